use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::enums::{Severity, ViolationStatus};

/// A confirmed code-enforcement violation, normalized and dated.
///
/// `property_key` stays `None` until the risk stage links the event to the
/// registry by address. A record with an unparseable date never becomes a
/// `ViolationEvent`; it is rejected at normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViolationEvent {
    pub property_key: Option<String>,
    pub address: String,
    pub district: Option<String>,
    pub date: NaiveDate,
    pub severity: Severity,
    pub status: ViolationStatus,
}
