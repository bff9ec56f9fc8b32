use serde::{Deserialize, Serialize};

/// Aggregate risk across all properties sharing a landlord identity.
///
/// Properties without a landlord identity never appear here; they remain in
/// the property-level output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandlordRiskScore {
    pub landlord: String,
    /// Sum of the property scores attributed to this landlord.
    pub aggregate_score: f64,
    pub property_count: usize,
    pub violation_events: usize,
    pub service_events: usize,
    /// True when `aggregate_score` meets the configured flag threshold.
    pub flagged: bool,
}
