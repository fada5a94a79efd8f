//! Catalog, pipeline and description panel rendering

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{AppState, CatalogRow, Focus};
use crate::catalog::BlockCatalog;
use crate::theme::Styles;

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Styles::border_active()
    } else {
        Styles::border_inactive()
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(Styles::title())
        .border_style(border_style)
}

/// Render the block catalog pane
pub fn render_catalog_pane(f: &mut Frame, state: &AppState, area: Rect) {
    let focused = state.focus == Focus::Catalog;

    let items: Vec<ListItem> = state
        .catalog_rows
        .iter()
        .enumerate()
        .map(|(index, row)| match row {
            CatalogRow::Category(name) => {
                ListItem::new(format!(" {}", name)).style(Styles::category())
            }
            CatalogRow::Block { label, .. } => {
                let selected = focused && index == state.catalog_index;
                let prefix = if selected { " ▸ " } else { "   " };
                let item = ListItem::new(format!("{}{}", prefix, label));
                if selected {
                    item.style(Styles::selected())
                } else {
                    item
                }
            }
        })
        .collect();

    let list = List::new(items).block(pane_block(" Blocks ", focused));
    f.render_widget(list, area);
}

/// Render the assembled pipeline pane
pub fn render_pipeline_pane(f: &mut Frame, state: &AppState, area: Rect) {
    let focused = state.focus == Focus::Pipeline;

    let items: Vec<ListItem> = if state.pipeline.is_empty() {
        vec![ListItem::new("  (empty - press Enter on a block to add it)")]
    } else {
        state
            .pipeline
            .selections
            .iter()
            .enumerate()
            .map(|(index, selection)| {
                let selected = focused && index == state.pipeline_index;
                let prefix = if selected { " ▸ " } else { "   " };
                let item = ListItem::new(format!("{}{}. {}", prefix, index + 1, selection.block));
                if selected {
                    item.style(Styles::selected())
                } else {
                    item
                }
            })
            .collect()
    };

    let title = format!(" Pipeline ({} blocks) ", state.pipeline.len());
    let list = List::new(items).block(pane_block(&title, focused));
    f.render_widget(list, area);
}

/// Render the description panel for the highlighted block
pub fn render_description_panel(
    f: &mut Frame,
    state: &AppState,
    catalog: &BlockCatalog,
    area: Rect,
) {
    let id = match state.focus {
        Focus::Catalog => state.selected_block_id().map(String::from),
        Focus::Pipeline => state
            .pipeline
            .selections
            .get(state.pipeline_index)
            .map(|s| s.block.clone()),
    };

    let text = match id.as_deref().map(|id| catalog.resolve(id)) {
        Some(Ok(block)) => format!(
            "{} [{}]\n{}",
            block.label,
            block.category,
            block.description.replace("<br>", "\n")
        ),
        Some(Err(_)) => "Unknown block".to_string(),
        None => String::new(),
    };

    let panel = Paragraph::new(text)
        .block(pane_block(" Description ", false))
        .wrap(Wrap { trim: false });
    f.render_widget(panel, area);
}
