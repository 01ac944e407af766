//! Search configuration loading.
//!
//! Every tuning constant of the search and the evaluation lives in
//! [`SearchConfig`], which can be read from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Hard ceiling on search depth, whatever the caller asks for.
pub const DEPTH_CEILING: u32 = 5;

/// Errors that can occur when loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// A value is outside its allowed range.
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Tuning parameters for the search and evaluation.
///
/// Every field has a default, so a TOML file only needs to name the values
/// it changes:
///
/// ```toml
/// max_depth = 3
/// time_limit_ms = 2000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest depth a search may use, capped at [`DEPTH_CEILING`].
    pub max_depth: u32,
    /// Score of a checkmate.
    pub checkmate_value: i32,
    /// Bonus for giving check.
    pub check_value: i32,
    /// Bonus for a side whose material lead exceeds a queen.
    pub winning_bonus: i32,
    /// Per-square reward for pieces close to the enemy king.
    pub king_proximity_weight: i32,
    /// Bonus for a queen that has not left its home row.
    pub queen_home_bonus: i32,
    /// Longest capture sequence followed past the search horizon.
    pub quiescence_depth: u32,
    /// Optional wall-clock budget for one search, in milliseconds.
    pub time_limit_ms: Option<u64>,
    /// Prune with alpha-beta. Turning this off gives plain minimax.
    pub alpha_beta: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: DEPTH_CEILING,
            checkmate_value: 100_000,
            check_value: 50,
            winning_bonus: 200,
            king_proximity_weight: 5,
            queen_home_bonus: 20,
            quiescence_depth: 4,
            time_limit_ms: None,
            alpha_beta: true,
        }
    }
}

impl SearchConfig {
    /// Loads a configuration file.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ReadError`] if the file exists but cannot be read,
    /// [`ConfigError::ParseError`] if it contains invalid TOML, or
    /// [`ConfigError::Invalid`] if a value fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            tracing::debug!(path = %path.display(), "no search config file, using defaults");
            Ok(Self::default())
        }
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values make sense.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::Invalid("max_depth must be at least 1".into()));
        }
        if self.checkmate_value <= 0 {
            return Err(ConfigError::Invalid(
                "checkmate_value must be positive".into(),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "time_limit_ms must be positive when set".into(),
            ));
        }
        Ok(())
    }

    /// The depth actually searched for a requested base depth.
    pub fn effective_depth(&self, requested: u32) -> u32 {
        requested.min(self.max_depth).min(DEPTH_CEILING)
    }

    /// The time budget, if any.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_ms.map(Duration::from_millis)
    }

    /// Returns a copy with pruning disabled.
    pub fn without_pruning(mut self) -> Self {
        self.alpha_beta = false;
        self
    }
}
