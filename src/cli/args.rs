//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    add::AddArgs, completions::CompletionsArgs, init::InitArgs, list::ListArgs,
    update::UpdateArgs,
};

#[derive(Parser)]
#[command(name = "sav")]
#[command(author, version, about = "Service-after-sale case tracker")]
#[command(long_about = "Track service-after-sale support cases in a plain JSON file that can be synced with git.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// JSON file holding the cases (default: sav_cases.json)
    #[arg(long, global = true, env = "SAV_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Output format
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty case file
    Init(InitArgs),

    /// Open a new support case
    Add(AddArgs),

    /// List cases, optionally filtered by status
    List(ListArgs),

    /// Change the status of a case
    Update(UpdateArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table on a terminal, plain columns otherwise
    #[default]
    Auto,
    /// Aligned columns
    Tsv,
    /// JSON format (full case records)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}
