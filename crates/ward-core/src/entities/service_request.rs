use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::Severity;

/// A 311 service request. Same shape as a violation but unverified, so it
/// scores at a lower fixed multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest311 {
    pub property_key: Option<String>,
    pub address: String,
    pub district: Option<String>,
    pub date: NaiveDate,
    /// Severity classified from the request category/title text.
    pub severity: Severity,
    pub category: String,
}
