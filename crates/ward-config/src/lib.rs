//! # ward-config
//!
//! Layered configuration loading for Wardline using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WARDLINE_*` prefix, `__` as separator)
//! 2. Project-level `.wardline/config.toml`
//! 3. User-level `~/.config/wardline/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WARDLINE_RISK__HALF_LIFE_DAYS` -> `risk.half_life_days`,
//! `WARDLINE_MATCHING__FUZZY_THRESHOLD` -> `matching.fuzzy_threshold`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use ward_config::WardConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = WardConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = WardConfig::load().expect("config");
//!
//! println!("half-life: {} days", config.risk.half_life_days);
//! ```

mod error;
mod matching;
mod paths;
mod risk;

pub use error::ConfigError;
pub use matching::MatchingConfig;
pub use paths::PathsConfig;
pub use risk::RiskConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WardConfig {
    #[serde(default)]
    pub risk: RiskConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

impl WardConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`WardConfig::load_with_dotenv`] if you
    /// need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when extraction fails or a section fails
    /// validation (e.g. non-monotone severity weights).
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` before building the figment. This is the typical
    /// entry point for the CLI and tests.
    ///
    /// # Errors
    ///
    /// Same as [`WardConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add additional
    /// providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".wardline/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("WARDLINE_").split("__"));

        figment
    }

    /// Cross-section validation, run after extraction.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for values that violate the risk
    /// model's invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.risk.validate()?;
        self.matching.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wardline").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir
    /// looking for a `.env` file. Silently does nothing if no `.env` is
    /// found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_loads_and_validates() {
        let config = WardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.risk.half_life_days, 180.0);
        assert_eq!(config.matching.fuzzy_threshold, 0.6);
    }

    #[test]
    fn figment_builds_without_files() {
        let figment = WardConfig::figment();
        let config: WardConfig = figment.extract().expect("should extract defaults");
        assert_eq!(config.risk.landlord_flag_threshold, 6.0);
        assert_eq!(config.paths.processed_dir, "data/processed");
    }
}
