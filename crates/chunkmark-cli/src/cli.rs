//! CLI argument parsing and command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// ============================================================================
// CLI argument types
// ============================================================================

/// Convert annotated Markdown into sectioned HTML.
#[derive(Parser, Debug)]
#[command(name = "chunkmark", author, version, about, long_about = None)]
pub struct CliArgs {
    /// Path to configuration file.
    #[arg(short, long, env = "CHUNKMARK_CONFIG")]
    pub config: Option<String>,

    /// Enable verbose output.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output.
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert Markdown files or directories to HTML.
    Convert(ConvertArgs),

    /// Configuration operations.
    Config(ConfigCommand),

    /// Print version information.
    Version,
}

/// Arguments of `chunkmark convert`.
#[derive(Parser, Debug, Default)]
pub struct ConvertArgs {
    /// Input files or directories (defaults to `input.path` from config).
    pub inputs: Vec<PathBuf>,

    /// Output directory (overrides `output.path`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fail documents whose frontmatter cannot be read.
    #[arg(long)]
    pub strict: bool,

    /// Slug headings that have no explicit id.
    #[arg(long)]
    pub auto_slug: bool,

    /// Write a JSON section manifest next to each page.
    #[arg(long)]
    pub manifest: bool,
}

/// Config-specific subcommands.
#[derive(Parser, Debug)]
pub struct ConfigCommand {
    /// Config subcommand to execute.
    #[command(subcommand)]
    pub command: ConfigAction,
}

/// Available config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path.
    Path,

    /// Get a configuration value by dotted key.
    Get {
        /// Dotted key (e.g., "output.path").
        key: String,
    },

    /// Create a default configuration file.
    Init {
        /// Output file path (defaults to XDG config path).
        #[arg(short, long)]
        file: Option<String>,

        /// Overwrite existing file.
        #[arg(long)]
        force: bool,
    },
}
