//! CLI command definitions and argument parsing.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Wikimeta CLI - Import knowledge graph properties into document metadata.
#[derive(Debug, Parser)]
#[command(name = "wikimeta")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "WIKIMETA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Comma-separated language codes, overriding the configuration
    #[arg(short, long, global = true)]
    pub language: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
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
    /// Search entities by free text
    Search(SearchArgs),

    /// Show the normalized properties of an entity
    Properties(PropertiesArgs),

    /// Import entity properties into a document
    Import(ImportArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search query text
    pub query: String,

    /// Maximum number of results to show
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

/// Arguments for the properties command.
#[derive(Debug, Parser)]
pub struct PropertiesArgs {
    /// Entity identifier (e.g., Q42)
    pub entity: String,

    /// Enable every filter (categories, meta pages, IDs, time ranges)
    #[arg(long)]
    pub strict: bool,

    /// Replacement for non-letter runs in property names
    #[arg(long)]
    pub space_replacement: Option<String>,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// Document path relative to the document root
    #[arg(required_unless_present = "search", conflicts_with = "search")]
    pub file: Option<String>,

    /// Entity identifier; defaults to the one recorded in the document
    #[arg(short, long, requires = "file")]
    pub entity: Option<String>,

    /// Search for an entity and import the first match
    #[arg(short, long)]
    pub search: Option<String>,

    /// Path template for the document created by --search
    #[arg(short, long, requires = "search")]
    pub template: Option<String>,

    /// Document root directory, overriding the configuration
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Replace existing values
    #[arg(long)]
    pub overwrite: bool,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration management actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the configuration file path
    Path,

    /// Write a default configuration file
    Init {
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
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
