//! Header and common widget rendering
//!
//! ASCII art header, status line, and the bottom navigation bar.

use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{AppMode, AppState, Focus};
use crate::theme::Colors;

/// Header renderer containing the ASCII art header
pub struct HeaderRenderer {
    /// ASCII art header lines
    header_lines: Vec<Line<'static>>,
}

impl Default for HeaderRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderRenderer {
    /// Create a new header renderer
    pub fn new() -> Self {
        Self {
            header_lines: Self::create_header(),
        }
    }

    /// Render the ASCII art header
    pub fn render_header(&self, f: &mut Frame, area: Rect) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let header = Paragraph::new(self.header_lines.clone())
            .block(Block::default().borders(Borders::NONE))
            .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    /// Create the ASCII art header
    fn create_header() -> Vec<Line<'static>> {
        [
            " ██████╗ ██╗██████╗ ███████╗███████╗███╗   ███╗██╗████████╗██╗  ██╗",
            " ██╔══██╗██║██╔══██╗██╔════╝██╔════╝████╗ ████║██║╚══██╔══╝██║  ██║",
            " ██████╔╝██║██████╔╝█████╗  ███████╗██╔████╔██║██║   ██║   ███████║",
            " ██╔═══╝ ██║██╔═══╝ ██╔══╝  ╚════██║██║╚██╔╝██║██║   ██║   ██╔══██║",
            " ██║     ██║██║     ███████╗███████║██║ ╚═╝ ██║██║   ██║   ██║  ██║",
            " ╚═╝     ╚═╝╚═╝     ╚══════╝╚══════╝╚═╝     ╚═╝╚═╝   ╚═╝   ╚═╝  ╚═╝",
        ]
        .iter()
        .map(|text| {
            Line::from(vec![Span::styled(
                *text,
                Style::default().fg(Colors::PRIMARY),
            )])
        })
        .collect()
    }
}

/// Render the status message line
pub fn render_status_line(f: &mut Frame, state: &AppState, area: Rect) {
    let style = if state.status_message.contains("failed") {
        Style::default().fg(Colors::ERROR)
    } else {
        Style::default().fg(Colors::FG_SECONDARY)
    };

    let status = Paragraph::new(state.status_message.as_str()).style(style);
    f.render_widget(status, area);
}

/// Render the navigation bar with keybinding hints
pub fn render_nav_bar(f: &mut Frame, state: &AppState, area: Rect) {
    let hints = match state.mode {
        AppMode::Prompt => " Enter confirm | Esc cancel",
        AppMode::Browse => match state.focus {
            Focus::Catalog => {
                " Tab pane | ↑/↓ move | Enter add | g generate | s save | l local files | ? help | q quit"
            }
            Focus::Pipeline => {
                " Tab pane | ↑/↓ move | d remove | J/K reorder | g generate | s save | ? help | q quit"
            }
        },
    };

    let nav = Paragraph::new(hints).style(Style::default().fg(Colors::FG_MUTED));
    f.render_widget(nav, area);
}
