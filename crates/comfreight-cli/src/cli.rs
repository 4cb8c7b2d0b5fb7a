//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ComFreight CLI - Track shipments and log exceptions.
#[derive(Debug, Parser)]
#[command(name = "comfreight")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "COMFREIGHT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List all shipments, newest first
    List,

    /// Search shipments by tracking id, origin or destination
    Search(SearchArgs),

    /// Show one shipment with its history and exceptions
    Show(ShowArgs),

    /// Create a new shipment
    Create(CreateArgs),

    /// Log an exception against a shipment
    LogException(LogExceptionArgs),

    /// Analyze an exception description without logging it
    Analyze(AnalyzeArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Text to look for (case-insensitive)
    pub term: String,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Tracking id (e.g. CFT-84620)
    pub id: String,
}

/// Arguments for the create command.
#[derive(Debug, Parser)]
pub struct CreateArgs {
    /// Origin location
    #[arg(short, long)]
    pub origin: String,

    /// Destination location
    #[arg(short, long)]
    pub destination: String,

    /// Carrier name
    #[arg(short = 'C', long)]
    pub carrier: String,

    /// Estimated delivery (YYYY-MM-DD or RFC 3339)
    #[arg(short, long)]
    pub eta: String,
}

/// Arguments for the log-exception command.
#[derive(Debug, Parser)]
pub struct LogExceptionArgs {
    /// Tracking id (e.g. CFT-84620)
    pub id: String,

    /// Description of the problem
    pub description: String,

    /// Ask the AI service to categorize the problem first
    #[arg(short, long)]
    pub analyze: bool,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    /// Description of the problem
    pub description: String,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
