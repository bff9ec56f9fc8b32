//! Normalization error types.
//!
//! Per-record problems are not errors -- they are rejections recorded in the
//! stage's `QualityReport`. These variants cover the fatal cases where a
//! whole table is unusable.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    /// A required input file is absent, has no header row, or has zero data
    /// rows. Downstream stages cannot produce meaningful output, so the
    /// stage aborts.
    #[error("Required input missing or empty: {path}")]
    MissingRequiredInput { path: String },

    /// Columns the dataset cannot be processed without were not found under
    /// any known alias.
    #[error("Missing required columns in {path}: {columns}")]
    MissingColumns { path: String, columns: String },

    /// CSV-level read failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure reading an input file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
