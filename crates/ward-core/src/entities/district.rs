use serde::{Deserialize, Serialize};

/// District-level risk summary produced by the spatial aggregator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistrictRiskSummary {
    pub district_id: String,
    pub mean_score: f64,
    pub total_score: f64,
    pub property_count: usize,
    /// Properties in this district whose landlord is flagged.
    pub flagged_count: usize,
    /// Properties placed here by the declared-district attribute fallback
    /// rather than polygon containment.
    pub fallback_count: usize,
}
