//! # Hornmine CLI Module
//!
//! ## Available Commands
//!
//! - `index` - Build the graph indexes and show their sizes
//! - `score` - Score a candidate rule against a graph

mod commands;

use crate::config::HornmineConfig;
use clap::{Parser, Subcommand};
use hornmine_core::HornError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Hornmine - Horn-clause rule scoring
///
/// Computes minimal image-based support and confidence of candidate rules
/// over a knowledge graph.
#[derive(Parser, Debug)]
#[command(name = "hornmine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a TOML config file (default: ./hornmine.toml if present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the graph indexes and show their sizes
    Index {
        /// Path to the graph document (JSON)
        #[arg(short, long)]
        graph: PathBuf,
    },

    /// Score a candidate rule
    Score {
        /// Path to the graph document (JSON)
        #[arg(short, long)]
        graph: PathBuf,

        /// Path to the rule document (JSON)
        #[arg(short, long)]
        rule: PathBuf,

        /// Minimum support (overrides the config file)
        #[arg(short = 's', long)]
        min_support: Option<usize>,

        /// Minimum confidence (overrides the config file)
        #[arg(short = 'c', long)]
        min_confidence: Option<usize>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli, config: &HornmineConfig) -> Result<(), HornError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Commands::Index { graph } => cmd_index(&graph, json_mode),
        Commands::Score {
            graph,
            rule,
            min_support,
            min_confidence,
        } => cmd_score(
            &graph,
            &rule,
            config.thresholds(min_support, min_confidence),
            json_mode,
        ),
    }
}
