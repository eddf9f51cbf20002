//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RCVis - narrated movies of ranked-choice election results
#[derive(Parser, Debug)]
#[command(name = "rcvis")]
#[command(about = "Narrated movies of ranked-choice election results", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Configuration file layered over the bundled defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the narration of every round
    Narrate {
        /// Tabulation summary JSON file
        #[arg(long)]
        summary: PathBuf,
    },

    /// Render both movie variants and print the resulting status
    Render {
        /// Tabulation summary JSON file
        #[arg(long)]
        summary: PathBuf,

        /// Slug of the visualization
        #[arg(long)]
        slug: String,

        /// Base URL the visualization frames are served from
        #[arg(long)]
        base_url: String,

        /// Render at most this many rounds
        #[arg(long)]
        rounds: Option<usize>,
    },

    /// Print the resolved configuration
    Config,
}
