use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// pipesmith - assemble tabular ETL jobs from reusable code blocks
#[derive(Parser)]
#[command(name = "pipesmith")]
#[command(about = "A terminal builder for tabular-data ETL jobs")]
#[command(version)]
pub struct Cli {
    /// Extend the builtin block catalog from a JSON definition file
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a job script and manifest from a saved pipeline file
    Generate {
        /// Path to the pipeline JSON file
        #[arg(short, long)]
        pipeline: PathBuf,

        /// Job folder to write run.py and .env into
        #[arg(short, long)]
        out: PathBuf,

        /// Also scaffold IN/, OUT/ and the runtime support library
        #[arg(long)]
        local_files: bool,
    },
    /// Validate a pipeline file against the catalog
    Validate {
        /// Path to the pipeline JSON file
        pipeline: PathBuf,
    },
    /// Print the block catalog listing
    Blocks,
}

impl Cli {
    pub fn parse_args() -> Self {
        <Self as clap::Parser>::parse()
    }
}
