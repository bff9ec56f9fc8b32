//! Validated risk model parameters.

use crate::error::RiskError;
use crate::weights::SeverityWeights;

/// Everything the scoring and aggregation functions need, validated once at
/// construction so the hot loops can trust their inputs.
#[derive(Debug, Clone)]
pub struct RiskParams {
    pub weights: SeverityWeights,
    pub half_life_days: f64,
    /// Fixed multiplier for 311 request scores.
    pub service_multiplier: f64,
    /// Landlords at or above this aggregate score are flagged.
    pub landlord_flag_threshold: f64,
}

impl RiskParams {
    /// # Errors
    ///
    /// `RiskError::InvalidWeights` or `RiskError::InvalidParameter` when a
    /// value violates the model's invariants.
    pub fn new(
        weight_table: &[f64],
        half_life_days: f64,
        service_multiplier: f64,
        landlord_flag_threshold: f64,
    ) -> Result<Self, RiskError> {
        if half_life_days <= 0.0 {
            return Err(RiskError::InvalidParameter {
                field: "half_life_days".into(),
                reason: "must be positive".into(),
            });
        }
        if service_multiplier < 0.0 {
            return Err(RiskError::InvalidParameter {
                field: "service_multiplier".into(),
                reason: "must be non-negative".into(),
            });
        }
        Ok(Self {
            weights: SeverityWeights::from_table(weight_table)?,
            half_life_days,
            service_multiplier,
            landlord_flag_threshold,
        })
    }
}

impl Default for RiskParams {
    fn default() -> Self {
        Self {
            weights: SeverityWeights::default(),
            half_life_days: 180.0,
            service_multiplier: 0.4,
            landlord_flag_threshold: 6.0,
        }
    }
}
