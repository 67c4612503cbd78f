// sakpro/src/cli.rs
//! This file defines the command-line interface (CLI) for the sakpro application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Default text inserted before `.htm` when deriving the output file name.
pub const DEFAULT_SUFFIX: &str = "_clean";

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "sakpro",
    version = env!("CARGO_PKG_VERSION"),
    about = "Strip an HTML document down to a small, display-ready subset of markup",
    long_about = "sakpro removes scripts, styles, frames and every tag and attribute outside a fixed allow-list from an HTML document, then collapses the empty tags, redundant line breaks and whitespace the stripping leaves behind.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress the summary and all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `sakpro` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Cleans a single HTML document.
    #[command(about = "Clean an HTML document and write the result next to it.")]
    Clean(CleanCommand),

    /// Prints the fixed tag and attribute policy.
    #[command(about = "Print the fixed tag and attribute policy as YAML.")]
    Policy,
}

/// Arguments for the `clean` command.
#[derive(Parser, Debug)]
pub struct CleanCommand {
    /// Path to the HTML document, or `-` for stdin.
    #[arg(value_name = "INPUT", help = "The HTML document to clean ('-' reads stdin).")]
    pub input: PathBuf,

    /// Write the cleaned document to this file instead of the derived name.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to this file instead of the derived name.")]
    pub output: Option<PathBuf>,

    /// Print the cleaned document to stdout.
    #[arg(long, conflicts_with = "output", help = "Print the cleaned document to stdout.")]
    pub stdout: bool,

    /// Text inserted before `.htm` in the derived output name.
    #[arg(long, env = "SAKPRO_SUFFIX", default_value = DEFAULT_SUFFIX, help = "Text inserted before '.htm' in the derived output file name.")]
    pub suffix: String,

    /// Suppress the cleaning summary.
    #[arg(long = "no-summary", help = "Suppress the cleaning summary.")]
    pub no_summary: bool,
}
