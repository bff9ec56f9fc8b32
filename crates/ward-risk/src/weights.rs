//! Severity weight table.

use ward_core::enums::Severity;

use crate::error::RiskError;

/// Weight per severity code, validated strictly increasing so a higher
/// severity code always contributes a strictly higher weight.
#[derive(Debug, Clone, PartialEq)]
pub struct SeverityWeights([f64; 5]);

impl SeverityWeights {
    /// Build from a raw five-entry table (index 0 = severity code 1).
    ///
    /// # Errors
    ///
    /// `RiskError::InvalidWeights` when the table is not exactly five
    /// positive, strictly increasing entries.
    pub fn from_table(table: &[f64]) -> Result<Self, RiskError> {
        let table: [f64; 5] = table.try_into().map_err(|_| RiskError::InvalidWeights {
            reason: format!("expected 5 entries, got {}", table.len()),
        })?;
        if table[0] <= 0.0 {
            return Err(RiskError::InvalidWeights {
                reason: "weights must be positive".into(),
            });
        }
        for pair in table.windows(2) {
            if pair[1] <= pair[0] {
                return Err(RiskError::InvalidWeights {
                    reason: "weights must be strictly increasing with severity".into(),
                });
            }
        }
        Ok(Self(table))
    }

    /// Weight for one severity class.
    #[must_use]
    pub const fn weight(&self, severity: Severity) -> f64 {
        self.0[severity.code() as usize - 1]
    }
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self([2.0, 4.0, 6.0, 8.0, 10.0])
    }
}
