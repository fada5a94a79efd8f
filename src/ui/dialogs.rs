//! Prompt and overlay rendering

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::input::InputDialog;
use crate::theme::Colors;

/// Compute a centered rect of the given percentage size
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Render the text input prompt
pub fn render_input_dialog(f: &mut Frame, dialog: &InputDialog) {
    let area = centered_rect(60, 25, f.area());
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", dialog.title))
        .title_style(
            Style::default()
                .fg(Colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(Colors::PRIMARY))
        .style(Style::default().bg(Colors::BG_PRIMARY));

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Instructions
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Input line
        ])
        .split(inner);

    let instructions = Paragraph::new(dialog.instructions.as_str())
        .style(Style::default().fg(Colors::FG_SECONDARY));
    f.render_widget(instructions, chunks[0]);

    let input = Paragraph::new(Line::from(vec![
        Span::styled("> ", Style::default().fg(Colors::SECONDARY)),
        Span::styled(
            dialog.value.as_str(),
            Style::default().fg(Colors::FG_PRIMARY),
        ),
        Span::styled("█", Style::default().fg(Colors::SECONDARY)),
    ]));
    f.render_widget(input, chunks[2]);
}

/// Render the help overlay
pub fn render_help_overlay(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    f.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from("  Tab        switch between catalog and pipeline"),
        Line::from("  ↑/↓, k/j   move selection"),
        Line::from("  Enter      add the highlighted block to the pipeline"),
        Line::from("  d, Del     remove the highlighted pipeline entry"),
        Line::from("  K / J      move the highlighted entry up / down"),
        Line::from("  g          generate run.py and .env into a job folder"),
        Line::from("  s          save the pipeline to a JSON file"),
        Line::from("  l          toggle IN/, OUT/ and utils/ scaffolding"),
        Line::from("  ?          toggle this help"),
        Line::from("  q, Esc     quit"),
    ];

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Colors::PRIMARY)
                        .add_modifier(Modifier::BOLD),
                )
                .border_style(Style::default().fg(Colors::PRIMARY))
                .style(Style::default().bg(Colors::BG_PRIMARY)),
        )
        .alignment(Alignment::Left);
    f.render_widget(help, area);
}
