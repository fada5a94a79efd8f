//! Script Compiler
//!
//! Turns an ordered pipeline of block selections into one generated artifact:
//! the job script (`run.py`) and its companion environment manifest (`.env`).
//! Compilation is a pure function of the catalog and the pipeline: no I/O, no
//! caching, and the same pipeline always produces byte-identical output.
//!
//! # Output contract
//!
//! The generated script has a fixed structure: foundational imports, one
//! import line per referenced category that needs one (first-appearance order,
//! deduplicated), the environment bootstrap, the entry point containing every
//! block's template in selection order, and a dispatch footer that routes
//! uncaught failures through `run_main`. The manifest always starts with the
//! job section (`IN`, `OUT`) and appends one section per referenced category
//! with declared variables, first occurrence of a key wins.
//!
//! Block templates are opaque text. Apart from optional `{{name}}` parameter
//! overrides, the compiler emits them verbatim and never validates them.

use thiserror::Error;

use crate::catalog::{BlockCatalog, BlockDefinition};
use crate::category::Category;
use crate::pipeline::{BlockSelection, Pipeline};

/// File name the generated script is destined for
pub const SCRIPT_FILE_NAME: &str = "run.py";

/// File name the generated manifest is destined for
pub const ENV_FILE_NAME: &str = ".env";

/// Fixed foundational imports of every generated script
const PREAMBLE: &[&str] = &[
    "import os",
    "import pandas as pd",
    "",
    "from utils.runner import *",
    "from utils.file_management import *",
    "from utils.data_management import *",
    "",
];

/// Errors raised by compilation
///
/// Resolution failure is the only way a compile can fail; template content is
/// accepted as-is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// A selected capability id is absent from the catalog
    #[error("Unknown capability: {id}")]
    UnknownCapability { id: String },
}

/// The generated program/manifest pair
///
/// Both texts derive from the same pipeline snapshot and must be persisted
/// together; a caller must never write one without the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Job script text, destined for [`SCRIPT_FILE_NAME`]
    pub script: String,
    /// Environment manifest text, destined for [`ENV_FILE_NAME`]
    pub env_file: String,
}

/// Compile a pipeline against a catalog
///
/// Fails with `UnknownCapability` on the first unresolved id, producing no
/// partial artifact. Never fails for any other reason.
pub fn compile(
    catalog: &BlockCatalog,
    pipeline: &Pipeline,
) -> Result<GeneratedArtifact, CompileError> {
    // Resolve everything up front so no text is assembled for a bad pipeline
    let mut resolved: Vec<(&BlockSelection, &BlockDefinition)> =
        Vec::with_capacity(pipeline.selections.len());
    for selection in &pipeline.selections {
        let block = catalog
            .resolve(&selection.block)
            .map_err(|_| CompileError::UnknownCapability {
                id: selection.block.clone(),
            })?;
        resolved.push((selection, block));
    }

    let categories = referenced_categories(&resolved);

    Ok(GeneratedArtifact {
        script: render_script(&resolved, &categories),
        env_file: render_env_file(&categories),
    })
}

/// Distinct categories referenced by the pipeline, in first-appearance order
fn referenced_categories(resolved: &[(&BlockSelection, &BlockDefinition)]) -> Vec<Category> {
    let mut categories = Vec::new();
    for (_, block) in resolved {
        if !categories.contains(&block.category) {
            categories.push(block.category);
        }
    }
    categories
}

fn render_script(
    resolved: &[(&BlockSelection, &BlockDefinition)],
    categories: &[Category],
) -> String {
    let mut lines: Vec<String> = PREAMBLE.iter().map(|l| l.to_string()).collect();

    // One import per referenced category with an import requirement
    for category in categories {
        if let Some(import) = category.import_line() {
            lines.push(import.to_string());
        }
    }

    // Environment bootstrap: env file lives next to the generated script
    lines.push("load_env(__file__)".to_string());
    lines.push(String::new());
    lines.push("OUT = os.getenv(\"OUT\")".to_string());
    lines.push("IN = os.getenv(\"IN\")".to_string());
    lines.push(String::new());

    lines.push(String::new());
    lines.push("def main():".to_string());

    for (selection, block) in resolved {
        lines.push(String::new());
        lines.push(format!("    # {}", block.id.to_uppercase()));
        for line in &block.code {
            lines.push(apply_params(line, selection));
        }
    }

    lines.push(String::new());
    lines.push(String::new());
    lines.push("if __name__ == \"__main__\":".to_string());
    lines.push("    run_main(main)".to_string());
    lines.push(String::new());

    lines.join("\n")
}

/// Substitute `{{name}}` placeholders from the selection's overrides
///
/// Selections without overrides (all builtin blocks today) pass through
/// untouched, keeping the template byte-verbatim.
fn apply_params(line: &str, selection: &BlockSelection) -> String {
    if selection.params.is_empty() {
        return line.to_string();
    }
    let mut out = line.to_string();
    for (name, value) in &selection.params {
        out = out.replace(&format!("{{{{{}}}}}", name), value);
    }
    out
}

fn render_env_file(categories: &[Category]) -> String {
    let mut lines: Vec<String> = vec!["# JOB".to_string(), "IN=".to_string(), "OUT=".to_string()];
    let mut declared: Vec<&str> = vec!["IN", "OUT"];

    for category in categories {
        let Some(section) = category.env_section() else {
            continue;
        };

        let fresh: Vec<&str> = section
            .keys
            .iter()
            .copied()
            .filter(|key| !declared.contains(key))
            .collect();
        if fresh.is_empty() {
            continue;
        }

        lines.push(String::new());
        lines.push(format!("# {}", section.label));
        for key in fresh {
            declared.push(key);
            lines.push(format!("{}=", key));
        }
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}
