//! Spatial error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SpatialError {
    /// Boundary file exists but is not parseable GeoJSON.
    #[error("Invalid district boundary file {path}: {source}")]
    InvalidBoundaries {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// I/O failure reading the boundary file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
