//! Risk model error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    /// The registry input is empty; scoring nothing is a configuration or
    /// ordering mistake, not a zero-risk city.
    #[error("Cannot score an empty property registry")]
    EmptyRegistry,

    /// The severity weight table violates the model's monotonicity
    /// invariant.
    #[error("Invalid severity weights: {reason}")]
    InvalidWeights { reason: String },

    /// A scalar parameter is out of range.
    #[error("Invalid risk parameter '{field}': {reason}")]
    InvalidParameter { field: String, reason: String },
}
