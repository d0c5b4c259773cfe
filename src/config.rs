use std::path::Path;

use crate::ai::{SearchConfig, WindowWeights, MAX_DEPTH};
use crate::arena::MatchConfig;
use crate::error::ConfigError;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub search: SearchConfig,
    pub weights: WindowWeights,
    pub arena: MatchConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.depth > MAX_DEPTH {
            return Err(ConfigError::Validation(format!(
                "search.depth must be <= {MAX_DEPTH}"
            )));
        }
        if self.arena.games == 0 {
            return Err(ConfigError::Validation("arena.games must be > 0".into()));
        }

        let w = &self.weights;
        if w.own_two < 0 {
            return Err(ConfigError::Validation(
                "weights.own_two must be >= 0".into(),
            ));
        }
        if w.own_three <= w.own_two {
            return Err(ConfigError::Validation(
                "weights.own_three must be > weights.own_two".into(),
            ));
        }
        if w.win <= w.own_three {
            return Err(ConfigError::Validation(
                "weights.win must be > weights.own_three".into(),
            ));
        }
        if w.opponent_three > 0 {
            return Err(ConfigError::Validation(
                "weights.opponent_three must be <= 0".into(),
            ));
        }
        if w.opponent_two > 0 {
            return Err(ConfigError::Validation(
                "weights.opponent_two must be <= 0".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(&AppConfig::default())
    }
}
