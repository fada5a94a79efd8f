//! pipesmith - Main entry point
//!
//! Parses the command line and either runs a headless command (generate,
//! validate, blocks) or launches the interactive terminal builder.

mod app;
mod catalog;
mod category;
mod cli;
mod compiler;
mod error;
mod input;
mod pipeline;
mod theme;
mod ui;
mod writer;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::path::Path;
use tracing::{debug, error, info};

use crate::catalog::BlockCatalog;
use crate::cli::{Cli, Commands};
use crate::pipeline::Pipeline;

/// Initialize the tracing subscriber
///
/// Defaults to `info`; `RUST_LOG` overrides.
fn init_logger() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Main application entry point
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger();
    info!("pipesmith starting up");

    let cli = Cli::parse_args();
    debug!("CLI arguments parsed");

    let catalog = build_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Some(Commands::Generate {
            pipeline,
            out,
            local_files,
        }) => {
            info!(pipeline = %pipeline.display(), out = %out.display(), "headless generation");
            run_generate(&catalog, &pipeline, &out, local_files)?;
        }
        Some(Commands::Validate { pipeline }) => {
            info!(pipeline = %pipeline.display(), "validating pipeline file");
            run_validate(&catalog, &pipeline)?;
        }
        Some(Commands::Blocks) => {
            run_blocks(&catalog);
        }
        None => {
            info!("no command specified, launching terminal builder");
            run_tui(catalog)?;
        }
    }

    Ok(())
}

/// Build the catalog, extending the builtin table from an optional file
fn build_catalog(extra: Option<&Path>) -> Result<BlockCatalog, Box<dyn std::error::Error>> {
    let mut catalog = BlockCatalog::with_builtin_blocks();

    if let Some(path) = extra {
        let count = catalog.extend_from_file(path)?;
        info!(count, path = %path.display(), "catalog extended from file");
    }

    Ok(catalog)
}

/// Headless generation from a saved pipeline file
fn run_generate(
    catalog: &BlockCatalog,
    pipeline_path: &Path,
    out: &Path,
    local_files: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::load_from_file(pipeline_path)?;

    match writer::generate_all(catalog, &pipeline, out, local_files) {
        Ok(script_path) => {
            info!(script = %script_path.display(), "generation complete");
            println!("✓ Generated {}", script_path.display());
            Ok(())
        }
        Err(e) => {
            error!("generation failed: {}", e);
            eprintln!("✗ Generation failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Validate every capability id of a pipeline file against the catalog
fn run_validate(
    catalog: &BlockCatalog,
    pipeline_path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::load_from_file(pipeline_path)?;

    let unknown = pipeline.unknown_capabilities(catalog);
    if unknown.is_empty() {
        println!(
            "✓ Pipeline is valid: {} block(s), all known",
            pipeline.len()
        );
        Ok(())
    } else {
        error!("pipeline references unknown capabilities: {:?}", unknown);
        eprintln!("✗ Unknown capabilities: {}", unknown.join(", "));
        std::process::exit(1);
    }
}

/// Print the catalog listing
fn run_blocks(catalog: &BlockCatalog) {
    for (category, blocks) in catalog.categories() {
        println!("{}", category);
        for block in blocks {
            println!("  {:<38} {}", block.id, block.label);
        }
        println!();
    }
}

/// Run the interactive terminal builder
fn run_tui(catalog: BlockCatalog) -> Result<(), Box<dyn std::error::Error>> {
    debug!("initializing terminal for TUI mode");

    enable_raw_mode()
        .map_err(|e| error::general_error(format!("Failed to enable raw mode: {}", e)))?;
    crossterm::execute!(stdout(), crossterm::terminal::EnterAlternateScreen)
        .map_err(|e| error::general_error(format!("Failed to enter alternate screen: {}", e)))?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| error::general_error(format!("Failed to create terminal: {}", e)))?;

    let mut app = app::App::new(catalog);
    let result = app.run(&mut terminal);

    // Cleanup terminal (always attempt cleanup, even if the app failed)
    let _ = disable_raw_mode();
    let _ = crossterm::execute!(stdout(), crossterm::terminal::LeaveAlternateScreen);

    result
}
