//! # ward-risk
//!
//! The Risk Model: severity-weighted, time-decayed scoring of violation and
//! 311 events per property, aggregated to landlord level.
//!
//! For each property:
//!
//! ```text
//! score = sum over events of severity_weight(event) * decay(age_in_days)
//! decay(age) = 0.5 ^ (age / half_life_days)
//! ```
//!
//! 311 requests are unverified complaints and contribute through a fixed
//! multiplier below 1; violations are confirmed findings and count in full.
//! Events that cannot be linked to any property are excluded from scoring
//! and surface in the stage's rejection summary.

pub mod decay;
pub mod error;
pub mod landlord;
pub mod link;
pub mod model;
pub mod params;
pub mod weights;

pub use decay::decay;
pub use error::RiskError;
pub use landlord::aggregate_landlords;
pub use link::{LinkedEvent, link_service_requests, link_violations};
pub use model::score_properties;
pub use params::RiskParams;
pub use weights::SeverityWeights;
