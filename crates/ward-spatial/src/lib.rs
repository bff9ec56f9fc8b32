//! # ward-spatial
//!
//! The Spatial Aggregator: joins property-level risk points to council
//! district polygons and produces district-level summaries.
//!
//! Assignment per property, in order:
//! 1. point-in-polygon against the district boundaries, in input order
//!    (a point inside more than one polygon is a data-quality warning,
//!    resolved by the first match and counted as ambiguous)
//! 2. the property's declared district attribute, when geometry is missing
//!    or matches nothing
//! 3. otherwise the property is excluded from district buckets and counted
//!    as unmatched; it is never dropped from the global total.

pub mod aggregate;
pub mod error;
pub mod geojson;
pub mod pip;

pub use aggregate::{RiskPoint, SpatialOutcome, aggregate_districts};
pub use error::SpatialError;
pub use geojson::{DistrictPolygon, load_districts};
