//! Risk model configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

const fn default_half_life_days() -> f64 {
    180.0
}

const fn default_service_multiplier() -> f64 {
    0.4
}

const fn default_landlord_flag_threshold() -> f64 {
    6.0
}

/// Default severity weight table for codes 1..=5. Strictly increasing, so
/// a higher severity code always carries a strictly higher weight.
fn default_severity_weights() -> Vec<f64> {
    vec![2.0, 4.0, 6.0, 8.0, 10.0]
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RiskConfig {
    /// Exponential decay half-life in days: an event this old contributes
    /// half its severity weight.
    #[serde(default = "default_half_life_days")]
    pub half_life_days: f64,

    /// Fixed multiplier applied to 311 request scores. 311 complaints are
    /// unverified, so they count less than confirmed violations.
    #[serde(default = "default_service_multiplier")]
    pub service_multiplier: f64,

    /// Landlords whose aggregate score meets this threshold are flagged.
    #[serde(default = "default_landlord_flag_threshold")]
    pub landlord_flag_threshold: f64,

    /// Weight per severity code, index 0 = code 1. Must be positive and
    /// strictly increasing.
    #[serde(default = "default_severity_weights")]
    pub severity_weights: Vec<f64>,
}

impl RiskConfig {
    /// Validate the risk invariants: positive half-life, non-negative
    /// multiplier, and a strictly monotone five-entry weight table.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.half_life_days <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "risk.half_life_days".into(),
                reason: "must be positive".into(),
            });
        }
        if self.service_multiplier < 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "risk.service_multiplier".into(),
                reason: "must be non-negative".into(),
            });
        }
        if self.severity_weights.len() != 5 {
            return Err(ConfigError::InvalidValue {
                field: "risk.severity_weights".into(),
                reason: format!("expected 5 entries, got {}", self.severity_weights.len()),
            });
        }
        for pair in self.severity_weights.windows(2) {
            if pair[1] <= pair[0] {
                return Err(ConfigError::InvalidValue {
                    field: "risk.severity_weights".into(),
                    reason: "weights must be strictly increasing with severity".into(),
                });
            }
        }
        if self.severity_weights[0] <= 0.0 {
            return Err(ConfigError::InvalidValue {
                field: "risk.severity_weights".into(),
                reason: "weights must be positive".into(),
            });
        }
        Ok(())
    }
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            half_life_days: default_half_life_days(),
            service_multiplier: default_service_multiplier(),
            landlord_flag_threshold: default_landlord_flag_threshold(),
            severity_weights: default_severity_weights(),
        }
    }
}
