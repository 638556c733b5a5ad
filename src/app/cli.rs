//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Sigil Tracer - Score free-hand traced seals against canonical templates
#[derive(Parser, Debug)]
#[command(name = "sigil-trace")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score a recorded tracing session
    Score {
        /// Input recording file
        #[arg(short, long)]
        recording: PathBuf,

        /// Output file for the score report (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Override the configured recognition difficulty
        #[arg(short, long)]
        difficulty: Option<String>,
    },

    /// Print per-stroke metrics of a recording
    Inspect {
        /// Input recording file
        recording: PathBuf,
    },

    /// Validate a seal template file
    Validate {
        /// Seal geometry JSON file
        template: PathBuf,
    },

    /// List built-in seal and glyph templates
    Templates {
        /// Show detailed information
        #[arg(short, long)]
        detailed: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
