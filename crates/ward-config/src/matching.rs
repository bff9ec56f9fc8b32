//! Address-matching configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_fuzzy_threshold() -> f64 {
    0.6
}

const fn default_fuzzy_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MatchingConfig {
    /// Minimum Jaccard token-set similarity for the fuzzy match strategy.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    /// Whether the fuzzy strategy runs at all. Exact and fallback
    /// strategies are always on.
    #[serde(default = "default_fuzzy_enabled")]
    pub fuzzy_enabled: bool,
}

impl MatchingConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when the threshold is outside
    /// (0, 1].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fuzzy_threshold <= 0.0 || self.fuzzy_threshold > 1.0 {
            return Err(ConfigError::InvalidValue {
                field: "matching.fuzzy_threshold".into(),
                reason: "must be within (0, 1]".into(),
            });
        }
        Ok(())
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            fuzzy_threshold: default_fuzzy_threshold(),
            fuzzy_enabled: default_fuzzy_enabled(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = MatchingConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.fuzzy_enabled);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let config = MatchingConfig {
            fuzzy_threshold: 1.5,
            ..MatchingConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
