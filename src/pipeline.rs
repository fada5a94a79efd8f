//! Pipeline selections and pipeline file handling
//!
//! A pipeline is an ordered, possibly-repeating sequence of capability
//! selections. Ordering is meaningful and caller-controlled; the same
//! capability may appear more than once and each occurrence emits its code
//! again. Pipelines can be saved to and loaded from JSON files so a job can
//! be regenerated headlessly from the exact same selection.

#![allow(dead_code)]

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::catalog::BlockCatalog;

/// One pipeline entry: a capability id plus optional per-instance overrides
///
/// Overrides substitute `{{name}}` placeholders in the block's template at
/// compile time. The builtin blocks carry no placeholders, so selections with
/// empty overrides emit their templates verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlockSelection {
    /// Capability id to resolve against the catalog
    pub block: String,

    /// Per-instance parameter overrides, applied to `{{name}}` placeholders
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl BlockSelection {
    /// Create a selection with no overrides
    pub fn new(block: impl Into<String>) -> Self {
        Self {
            block: block.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter override
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }
}

/// An ordered sequence of block selections defining one job
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pipeline {
    pub selections: Vec<BlockSelection>,
}

impl Pipeline {
    /// Create an empty pipeline
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a pipeline from bare capability ids
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selections: ids.into_iter().map(BlockSelection::new).collect(),
        }
    }

    /// Append a selection
    pub fn push(&mut self, selection: BlockSelection) {
        self.selections.push(selection);
    }

    /// Remove the selection at `index`, if present
    pub fn remove(&mut self, index: usize) -> Option<BlockSelection> {
        if index < self.selections.len() {
            Some(self.selections.remove(index))
        } else {
            None
        }
    }

    /// Swap two selections; out-of-range indices are ignored
    pub fn swap(&mut self, a: usize, b: usize) {
        if a < self.selections.len() && b < self.selections.len() {
            self.selections.swap(a, b);
        }
    }

    pub fn len(&self) -> usize {
        self.selections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }

    /// Check every capability id against the catalog
    ///
    /// Returns the list of unknown ids (empty when the pipeline is valid).
    /// Unlike compilation this is not fail-fast; the presentation layer wants
    /// all problems at once.
    pub fn unknown_capabilities(&self, catalog: &BlockCatalog) -> Vec<String> {
        self.selections
            .iter()
            .filter(|s| !catalog.contains(&s.block))
            .map(|s| s.block.clone())
            .collect()
    }

    /// Save the pipeline to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json =
            serde_json::to_string_pretty(self).context("Failed to serialize pipeline to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write pipeline to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load a pipeline from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read pipeline from {:?}", path.as_ref()))?;

        let pipeline: Self =
            serde_json::from_str(&content).context("Failed to parse pipeline JSON")?;

        Ok(pipeline)
    }
}
