use serde::{Deserialize, Serialize};

/// One (year, district) cell of the student-housing concentration trend.
///
/// `year` and `district` are strings because rows missing either are
/// bucketed under `"UNKNOWN"` rather than dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendRow {
    pub year: String,
    pub district: String,
    pub records: usize,
    pub students: u64,
    pub units: u64,
    /// `students / units`, 0.0 when no units were reported.
    pub students_per_unit: f64,
}
