//! User interface rendering module
//!
//! This module is organized into submodules for better maintainability:
//! - `header` - ASCII art header, title, nav bar and status line
//! - `panes` - catalog pane, pipeline pane and description panel
//! - `dialogs` - text prompt and help overlay rendering

mod dialogs;
mod header;
mod panes;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::{AppMode, AppState};
use crate::catalog::BlockCatalog;

// Re-export for external use
pub use header::HeaderRenderer;

/// UI renderer for the application
///
/// Main entry point for rendering; delegates to the specialized submodules.
pub struct UiRenderer {
    header: HeaderRenderer,
}

impl Default for UiRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl UiRenderer {
    /// Create a new UI renderer
    pub fn new() -> Self {
        Self {
            header: HeaderRenderer::new(),
        }
    }

    /// Render the complete UI based on application state
    pub fn render(&self, f: &mut Frame, state: &AppState, catalog: &BlockCatalog) {
        // Main layout with nav bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Content area
                Constraint::Length(1), // Navigation bar
            ])
            .split(f.area());

        let content_area = main_chunks[0];
        let nav_bar_area = main_chunks[1];

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(7), // Header
                Constraint::Min(10),   // Panes
                Constraint::Length(8), // Description panel
                Constraint::Length(1), // Status line
            ])
            .split(content_area);

        self.header.render_header(f, chunks[0]);

        let pane_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);

        panes::render_catalog_pane(f, state, pane_chunks[0]);
        panes::render_pipeline_pane(f, state, pane_chunks[1]);
        panes::render_description_panel(f, state, catalog, chunks[2]);
        header::render_status_line(f, state, chunks[3]);

        header::render_nav_bar(f, state, nav_bar_area);

        // Prompt and help overlay render on top of everything
        if state.mode == AppMode::Prompt {
            if let Some((_, dialog)) = &state.prompt {
                dialogs::render_input_dialog(f, dialog);
            }
        }

        if state.help_visible {
            dialogs::render_help_overlay(f);
        }
    }
}
