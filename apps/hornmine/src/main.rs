//! # Hornmine
//!
//! Score candidate Horn-clause rules against a knowledge graph.
//!
//! ## Usage
//!
//! ```bash
//! # Show index sizes of a graph
//! hornmine index -g graph.json
//!
//! # Score a rule with explicit thresholds
//! hornmine score -g graph.json -r rule.json -s 2 -c 1
//!
//! # Machine-readable output
//! hornmine --json-mode score -g graph.json -r rule.json
//! ```

use clap::Parser;
use hornmine::cli;
use hornmine::config::{HornmineConfig, LOG_FORMAT_ENV, LogFormat};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    let mut config = HornmineConfig::resolve(cli.config.as_deref());
    let ignored_format = config
        .as_mut()
        .ok()
        .and_then(HornmineConfig::apply_env_overrides);
    let log_format = config
        .as_ref()
        .map_or(LogFormat::default(), |c| c.logging.format);
    init_tracing(log_format);

    if let Some(value) = ignored_format {
        tracing::warn!(value = %value, "ignoring unknown {}", LOG_FORMAT_ENV);
    }

    let result = config.and_then(|config| cli::execute(cli, &config));
    if let Err(e) = result {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "hornmine=info,hornmine_core=info".into());

    match format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}
