//! # ward-normalize
//!
//! The Record Normalizer: turns raw, column-name-addressed CSV snapshots
//! into typed records, one dataset at a time.
//!
//! Responsibilities:
//! - CSV reading with header capture (`table`)
//! - Header aliasing so each dataset's varying column names resolve to a
//!   canonical schema (`columns`)
//! - Per-field parse-and-validate: dates, counts, coordinates (`dates`,
//!   `values`)
//! - Address normalization and token-set similarity shared with the
//!   registry and risk stages (`address`)
//! - Per-dataset normalizers with duplicate collapse and quality
//!   accounting (`datasets`)
//!
//! No raw string propagates past this crate: downstream stages consume
//! typed records only.

pub mod address;
pub mod columns;
pub mod datasets;
pub mod dates;
pub mod error;
pub mod table;
pub mod values;

pub use error::NormalizeError;
pub use table::RawTable;
