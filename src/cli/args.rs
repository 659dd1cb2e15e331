//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    compare::CompareArgs, completions::CompletionsArgs, config::ConfigCommands,
    export::ExportArgs, facets::FacetsArgs, glossary::GlossaryArgs, list::ListArgs,
    matrix::MatrixArgs, summary::SummaryArgs,
};

#[derive(Parser)]
#[command(name = "oreg")]
#[command(author, version, about = "Operando sample environment registry")]
#[command(long_about = "Browse, filter, compare and export the operando sample environment hardware registry.")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Registry JSON file (default: operando_cell_registry.json)
    #[arg(long, global = true, env = "OREG_REGISTRY")]
    pub registry: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List hardware matching the filters
    List(ListArgs),

    /// Show dashboard metrics for the filtered set
    Summary(SummaryArgs),

    /// Compare up to three records side by side
    Compare(CompareArgs),

    /// Technique compatibility matrix
    Matrix(MatrixArgs),

    /// Export the filtered set as JSON
    Export(ExportArgs),

    /// List the techniques and instruments available as filters
    Facets(FacetsArgs),

    /// Look up technique definitions
    Glossary(GlossaryArgs),

    /// Show configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Automatically detect based on context (tsv for tables)
    #[default]
    Auto,
    /// Tab-separated values (for piping)
    Tsv,
    /// JSON format (for programming)
    Json,
    /// CSV format (for spreadsheets)
    Csv,
    /// Markdown tables
    Md,
    /// Just IDs, one per line
    Id,
}

impl OutputFormat {
    /// Resolve `Auto` against the configured default, then `fallback`
    pub fn resolve(self, configured: Option<&str>, fallback: OutputFormat) -> OutputFormat {
        if self != OutputFormat::Auto {
            return self;
        }
        configured
            .and_then(|s| OutputFormat::from_str(s, true).ok())
            .filter(|f| *f != OutputFormat::Auto)
            .unwrap_or(fallback)
    }
}
