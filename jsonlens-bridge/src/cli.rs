use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use jsonlens_core::ExportFormat;

#[derive(Debug, Parser)]
#[command(name = "jsonlens", version, about = "Find, format and undo JSON buried in text")]
pub struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract JSON blocks from a file (or stdin) and print them.
    Extract {
        file: Option<PathBuf>,

        #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
    /// Interactive session with undo/redo (default).
    Repl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Md,
    /// One line per block.
    Summary,
}

impl OutputFormat {
    pub fn export_format(self) -> Option<ExportFormat> {
        match self {
            OutputFormat::Json => Some(ExportFormat::Json),
            OutputFormat::Text => Some(ExportFormat::Text),
            OutputFormat::Md => Some(ExportFormat::Markdown),
            OutputFormat::Summary => None,
        }
    }
}
