//! # Configuration
//!
//! Optional TOML configuration for the CLI.
//!
//! The file is taken from `--config`, or from `./hornmine.toml` when that
//! exists. A missing default file means built-in defaults; a missing
//! explicit file is an error. `HORNMINE_LOG_FORMAT` overrides the logging
//! format, and `--min-support` / `--min-confidence` override the scoring
//! thresholds.
//!
//! ```toml
//! [scoring]
//! min_support = 2
//! min_confidence = 1
//!
//! [logging]
//! format = "json"
//! ```

use hornmine_core::{HornError, Thresholds};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "hornmine.toml";

/// Environment variable selecting the log format.
pub const LOG_FORMAT_ENV: &str = "HORNMINE_LOG_FORMAT";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// CONFIGURATION SCHEMA
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HornmineConfig {
    pub scoring: ScoringConfig,
    pub logging: LoggingConfig,
}

/// Default thresholds for `hornmine score`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub min_support: usize,
    pub min_confidence: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let thresholds = Thresholds::default();
        Self {
            min_support: thresholds.min_support,
            min_confidence: thresholds.min_confidence,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Parse `text` / `json`; anything else is `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl HornmineConfig {
    /// Resolve the effective configuration.
    ///
    /// `explicit` is the `--config` argument. Environment overrides are
    /// applied separately with [`HornmineConfig::apply_env_overrides`].
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, HornError> {
        let config = match explicit {
            Some(path) => Self::load_from_file(path)?,
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load_from_file(&default)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(config)
    }

    /// Load from a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, HornError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            HornError::ConfigError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(HornError::ConfigError(format!(
                "Config file size {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            HornError::ConfigError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::load_from_str(&content)
    }

    /// Parse TOML text.
    pub fn load_from_str(content: &str) -> Result<Self, HornError> {
        toml::from_str(content).map_err(|e| HornError::ConfigError(e.to_string()))
    }

    /// Apply `HORNMINE_LOG_FORMAT`.
    ///
    /// An unknown value leaves the format unchanged and is returned, so the
    /// caller can report it once a subscriber is installed.
    pub fn apply_env_overrides(&mut self) -> Option<String> {
        let value = std::env::var(LOG_FORMAT_ENV).ok()?;
        if self.override_log_format(&value) {
            None
        } else {
            Some(value)
        }
    }

    /// Set the log format by name. Returns `false` for unknown names.
    pub fn override_log_format(&mut self, value: &str) -> bool {
        match LogFormat::parse(value) {
            Some(format) => {
                self.logging.format = format;
                true
            }
            None => false,
        }
    }

    /// Thresholds after applying command-line overrides.
    pub fn thresholds(
        &self,
        min_support: Option<usize>,
        min_confidence: Option<usize>,
    ) -> Thresholds {
        Thresholds {
            min_support: min_support.unwrap_or(self.scoring.min_support),
            min_confidence: min_confidence.unwrap_or(self.scoring.min_confidence),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
