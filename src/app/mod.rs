//! Application module
//!
//! Contains the main application logic, state management, and event handling
//! for the terminal builder.
//!
//! # Module Structure
//! - `state` - Application state types (AppState, AppMode, Focus, ...)
//! - Main module - App struct and event loop

mod state;

// Re-export state types for external use
pub use state::{AppMode, AppState, CatalogRow, Focus, PromptKind};

use crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::time::Duration;
use tracing::{debug, info};

use crate::catalog::BlockCatalog;
use crate::input::{InputDialog, InputResult};
use crate::pipeline::BlockSelection;
use crate::ui::UiRenderer;
use crate::writer;

/// Main application struct
pub struct App {
    state: AppState,
    catalog: BlockCatalog,
    ui_renderer: UiRenderer,
}

impl App {
    /// Create a new application instance
    pub fn new(catalog: BlockCatalog) -> Self {
        info!("creating new App instance");
        Self {
            state: AppState::new(&catalog),
            catalog,
            ui_renderer: UiRenderer::new(),
        }
    }

    /// Run the main application loop
    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        info!("starting main application loop");

        loop {
            if crossterm::event::poll(Duration::from_millis(50))? {
                match crossterm::event::read()? {
                    Event::Key(key_event) => {
                        if self.handle_key_event(key_event) {
                            break; // Exit requested
                        }
                    }
                    Event::Resize(_, _) => {
                        // Layout is recomputed on every draw; nothing to do
                    }
                    _ => {}
                }
            }

            terminal.draw(|f| {
                self.ui_renderer.render(f, &self.state, &self.catalog);
            })?;
        }

        Ok(())
    }

    /// Handle a keyboard event; returns true when the app should exit
    pub fn handle_key_event(&mut self, key_event: KeyEvent) -> bool {
        if self.state.mode == AppMode::Prompt {
            self.handle_prompt_key(key_event);
            return false;
        }

        // Help overlay swallows everything except its own toggle/close keys
        if self.state.help_visible {
            if matches!(
                key_event.code,
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')
            ) {
                self.state.help_visible = false;
            }
            return false;
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Char('?') => self.state.help_visible = true,
            KeyCode::Tab => {
                self.state.focus = match self.state.focus {
                    Focus::Catalog => Focus::Pipeline,
                    Focus::Pipeline => Focus::Catalog,
                };
            }
            KeyCode::Up | KeyCode::Char('k') => match self.state.focus {
                Focus::Catalog => self.state.catalog_up(),
                Focus::Pipeline => self.state.pipeline_up(),
            },
            KeyCode::Down | KeyCode::Char('j') => match self.state.focus {
                Focus::Catalog => self.state.catalog_down(),
                Focus::Pipeline => self.state.pipeline_down(),
            },
            KeyCode::Enter => {
                if self.state.focus == Focus::Catalog {
                    self.add_selected_block();
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if self.state.focus == Focus::Pipeline {
                    self.remove_selected_block();
                }
            }
            KeyCode::Char('K') => {
                if self.state.focus == Focus::Pipeline && self.state.pipeline_index > 0 {
                    let i = self.state.pipeline_index;
                    self.state.pipeline.swap(i, i - 1);
                    self.state.pipeline_index = i - 1;
                }
            }
            KeyCode::Char('J') => {
                if self.state.focus == Focus::Pipeline
                    && self.state.pipeline_index + 1 < self.state.pipeline.len()
                {
                    let i = self.state.pipeline_index;
                    self.state.pipeline.swap(i, i + 1);
                    self.state.pipeline_index = i + 1;
                }
            }
            KeyCode::Char('l') => {
                self.state.local_files = !self.state.local_files;
                self.state.status_message = format!(
                    "Local files (IN/, OUT/, utils/): {}",
                    if self.state.local_files { "on" } else { "off" }
                );
            }
            KeyCode::Char('g') => self.open_prompt(
                PromptKind::Generate,
                "Generate Job",
                "Enter the job folder, then press Enter",
                "jobs/",
            ),
            KeyCode::Char('s') => self.open_prompt(
                PromptKind::SavePipeline,
                "Save Pipeline",
                "Enter the pipeline file path, then press Enter",
                "pipeline.json",
            ),
            _ => {}
        }

        false
    }

    fn open_prompt(&mut self, kind: PromptKind, title: &str, instructions: &str, initial: &str) {
        if kind == PromptKind::Generate && self.state.pipeline.is_empty() {
            self.state.status_message = "Pipeline is empty - add blocks first".to_string();
            return;
        }
        self.state.prompt = Some((kind, InputDialog::new(title, instructions, initial)));
        self.state.mode = AppMode::Prompt;
    }

    fn handle_prompt_key(&mut self, key_event: KeyEvent) {
        let Some((kind, mut dialog)) = self.state.prompt.take() else {
            self.state.mode = AppMode::Browse;
            return;
        };

        match dialog.handle_input(key_event) {
            InputResult::Continue => {
                self.state.prompt = Some((kind, dialog));
            }
            InputResult::Cancel => {
                self.state.mode = AppMode::Browse;
                self.state.status_message = "Cancelled".to_string();
            }
            InputResult::Confirm(value) => {
                self.state.mode = AppMode::Browse;
                match kind {
                    PromptKind::Generate => self.generate_into(&value),
                    PromptKind::SavePipeline => self.save_pipeline_to(&value),
                }
            }
        }
    }

    fn add_selected_block(&mut self) {
        let Some(id) = self.state.selected_block_id().map(String::from) else {
            return;
        };
        debug!(block = %id, "adding block to pipeline");

        self.state.pipeline.push(BlockSelection::new(&id));
        self.state.pipeline_index = self.state.pipeline.len() - 1;
        self.state.status_message = format!("Added {} ({} blocks)", id, self.state.pipeline.len());
    }

    fn remove_selected_block(&mut self) {
        let i = self.state.pipeline_index;
        if let Some(removed) = self.state.pipeline.remove(i) {
            self.state.clamp_pipeline_index();
            self.state.status_message = format!(
                "Removed {} ({} blocks)",
                removed.block,
                self.state.pipeline.len()
            );
        }
    }

    fn generate_into(&mut self, folder: &str) {
        if folder.trim().is_empty() {
            self.state.status_message = "No folder given - generation cancelled".to_string();
            return;
        }

        match writer::generate_all(
            &self.catalog,
            &self.state.pipeline,
            folder.trim(),
            self.state.local_files,
        ) {
            Ok(script_path) => {
                self.state.status_message = format!("Generated {}", script_path.display());
            }
            Err(e) => {
                self.state.status_message = format!("Generation failed: {}", e);
            }
        }
    }

    fn save_pipeline_to(&mut self, path: &str) {
        if path.trim().is_empty() {
            self.state.status_message = "No path given - save cancelled".to_string();
            return;
        }

        match self.state.pipeline.save_to_file(path.trim()) {
            Ok(()) => {
                self.state.status_message = format!("Pipeline saved to {}", path.trim());
            }
            Err(e) => {
                self.state.status_message = format!("Save failed: {}", e);
            }
        }
    }

    /// Read-only access to the state (for rendering and tests)
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
