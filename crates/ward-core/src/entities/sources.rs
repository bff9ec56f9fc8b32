use serde::{Deserialize, Serialize};

/// A SAM (street address management) registry row: the city's canonical
/// address list with point coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamAddressRecord {
    pub native_id: String,
    pub address: String,
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A property-assessment row; the source of landlord identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub native_id: String,
    pub address: String,
    pub district: Option<String>,
    pub landlord: Option<String>,
}
