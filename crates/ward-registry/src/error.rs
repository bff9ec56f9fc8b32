//! Registry error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    /// Every input record was rejected upstream; an empty registry would
    /// make all downstream stages meaningless, so the stage aborts.
    #[error("No records survived normalization; cannot build a property registry")]
    NoRecords,
}
