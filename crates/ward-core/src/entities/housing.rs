use serde::{Deserialize, Serialize};

/// A normalized student-housing survey row.
///
/// Numeric fields are `None` when the source cell was empty or carried no
/// digits; the trend stage treats those as zero contribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentHousingRecord {
    pub address: String,
    pub district: Option<String>,
    pub year: Option<i32>,
    pub student_count: Option<u32>,
    pub units: Option<u32>,
    pub landlord: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
