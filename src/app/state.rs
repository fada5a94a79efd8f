//! Application state definitions
//!
//! Contains all state-related types for the terminal builder: the mode, the
//! pane focus, the flattened catalog rows, and the pipeline being assembled.

use crate::catalog::BlockCatalog;
use crate::input::InputDialog;
use crate::pipeline::Pipeline;

/// One row of the catalog pane
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRow {
    /// Category header row (not selectable as a block)
    Category(String),
    /// Selectable block row
    Block { id: String, label: String },
}

/// Which pane currently receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Catalog,
    Pipeline,
}

/// What a currently open prompt is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// Ask for the job folder, then generate into it
    Generate,
    /// Ask for a file path, then save the pipeline JSON
    SavePipeline,
}

/// Application operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Normal two-pane browsing
    Browse,
    /// A text prompt is open
    Prompt,
}

/// Main application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Current application mode
    pub mode: AppMode,
    /// Pane receiving navigation keys
    pub focus: Focus,
    /// Flattened catalog listing (category headers + blocks)
    pub catalog_rows: Vec<CatalogRow>,
    /// Selected row in the catalog pane
    pub catalog_index: usize,
    /// The pipeline being assembled
    pub pipeline: Pipeline,
    /// Selected row in the pipeline pane
    pub pipeline_index: usize,
    /// Status message for user feedback
    pub status_message: String,
    /// Whether the help overlay is visible
    pub help_visible: bool,
    /// Whether generation also scaffolds IN/, OUT/ and the runtime library
    pub local_files: bool,
    /// Open text prompt, if any
    pub prompt: Option<(PromptKind, InputDialog)>,
}

impl AppState {
    /// Build the initial state from a catalog listing
    pub fn new(catalog: &BlockCatalog) -> Self {
        let mut rows = Vec::new();
        for (category, blocks) in catalog.categories() {
            rows.push(CatalogRow::Category(category.to_string()));
            for block in blocks {
                rows.push(CatalogRow::Block {
                    id: block.id.clone(),
                    label: block.label.clone(),
                });
            }
        }

        // Start on the first selectable block
        let catalog_index = rows
            .iter()
            .position(|r| matches!(r, CatalogRow::Block { .. }))
            .unwrap_or(0);

        Self {
            mode: AppMode::Browse,
            focus: Focus::Catalog,
            catalog_rows: rows,
            catalog_index,
            pipeline: Pipeline::new(),
            pipeline_index: 0,
            status_message: "Select blocks, then press g to generate".to_string(),
            help_visible: false,
            local_files: true,
            prompt: None,
        }
    }

    /// Capability id of the selected catalog row, if it is a block
    pub fn selected_block_id(&self) -> Option<&str> {
        match self.catalog_rows.get(self.catalog_index) {
            Some(CatalogRow::Block { id, .. }) => Some(id),
            _ => None,
        }
    }

    /// Move the catalog selection up, skipping category headers
    pub fn catalog_up(&mut self) {
        let mut i = self.catalog_index;
        while i > 0 {
            i -= 1;
            if matches!(self.catalog_rows.get(i), Some(CatalogRow::Block { .. })) {
                self.catalog_index = i;
                return;
            }
        }
    }

    /// Move the catalog selection down, skipping category headers
    pub fn catalog_down(&mut self) {
        let mut i = self.catalog_index;
        while i + 1 < self.catalog_rows.len() {
            i += 1;
            if matches!(self.catalog_rows.get(i), Some(CatalogRow::Block { .. })) {
                self.catalog_index = i;
                return;
            }
        }
    }

    /// Move the pipeline selection up
    pub fn pipeline_up(&mut self) {
        self.pipeline_index = self.pipeline_index.saturating_sub(1);
    }

    /// Move the pipeline selection down
    pub fn pipeline_down(&mut self) {
        if self.pipeline_index + 1 < self.pipeline.len() {
            self.pipeline_index += 1;
        }
    }

    /// Keep the pipeline selection inside bounds after a removal
    pub fn clamp_pipeline_index(&mut self) {
        if self.pipeline_index >= self.pipeline.len() {
            self.pipeline_index = self.pipeline.len().saturating_sub(1);
        }
    }
}
