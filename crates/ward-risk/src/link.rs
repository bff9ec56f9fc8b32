//! Event-to-property linking.
//!
//! Events usually arrive with raw addresses rather than property keys. The
//! registry's matcher resolves them with the same normalization the
//! registry itself was built with; an event no strategy can place is
//! excluded from scoring and counted as unlinked.

use chrono::NaiveDate;
use tracing::debug;
use ward_core::entities::{ServiceRequest311, ViolationEvent};
use ward_core::enums::{EventKind, Severity};
use ward_core::quality::{QualityReport, RejectReason};
use ward_registry::Matcher;

/// An event resolved to a registry property, ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedEvent {
    pub property_key: String,
    pub date: NaiveDate,
    pub severity: Severity,
    pub kind: EventKind,
}

/// Link violation events. Pre-linked events pass through untouched.
#[must_use]
pub fn link_violations(
    events: &[ViolationEvent],
    matcher: &Matcher<'_>,
) -> (Vec<LinkedEvent>, QualityReport) {
    let mut report = QualityReport::new("risk/link_violations");
    report.rows_seen = events.len();

    let mut linked = Vec::with_capacity(events.len());
    for (position, event) in events.iter().enumerate() {
        let key = resolve_key(
            event.property_key.as_deref(),
            &event.address,
            event.district.as_deref(),
            matcher,
        );
        match key {
            Some(property_key) => linked.push(LinkedEvent {
                property_key,
                date: event.date,
                severity: event.severity,
                kind: EventKind::Violation,
            }),
            None => {
                debug!(address = %event.address, "violation did not link to any property");
                report.rows_unlinked += 1;
                report.reject(
                    position + 1,
                    RejectReason::UnlinkedAddress(event.address.clone()),
                );
            }
        }
    }

    report.rows_emitted = linked.len();
    (linked, report)
}

/// Link 311 service requests. Same contract as [`link_violations`].
#[must_use]
pub fn link_service_requests(
    requests: &[ServiceRequest311],
    matcher: &Matcher<'_>,
) -> (Vec<LinkedEvent>, QualityReport) {
    let mut report = QualityReport::new("risk/link_service_311");
    report.rows_seen = requests.len();

    let mut linked = Vec::with_capacity(requests.len());
    for (position, request) in requests.iter().enumerate() {
        let key = resolve_key(
            request.property_key.as_deref(),
            &request.address,
            request.district.as_deref(),
            matcher,
        );
        match key {
            Some(property_key) => linked.push(LinkedEvent {
                property_key,
                date: request.date,
                severity: request.severity,
                kind: EventKind::ServiceRequest,
            }),
            None => {
                debug!(address = %request.address, "311 request did not link to any property");
                report.rows_unlinked += 1;
                report.reject(
                    position + 1,
                    RejectReason::UnlinkedAddress(request.address.clone()),
                );
            }
        }
    }

    report.rows_emitted = linked.len();
    (linked, report)
}

fn resolve_key(
    pre_linked: Option<&str>,
    address: &str,
    district: Option<&str>,
    matcher: &Matcher<'_>,
) -> Option<String> {
    if let Some(key) = pre_linked {
        return Some(key.to_string());
    }
    matcher
        .resolve(address, district)
        .map(|resolution| resolution.property_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use ward_core::entities::PropertyRecord;
    use ward_core::enums::{SourceDataset, ViolationStatus};
    use ward_registry::AddressIndex;

    fn registry() -> Vec<PropertyRecord> {
        let mut source_ids = BTreeMap::new();
        source_ids.insert(SourceDataset::Sam, vec!["S1".to_string()]);
        vec![PropertyRecord {
            property_key: "k1".into(),
            address: "12 Elm St".into(),
            normalized_address: "12 elm st".into(),
            district: None,
            latitude: None,
            longitude: None,
            landlord: None,
            source_ids,
            unmatched: false,
        }]
    }

    fn violation(address: &str) -> ViolationEvent {
        ViolationEvent {
            property_key: None,
            address: address.into(),
            district: None,
            date: NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            severity: Severity::High,
            status: ViolationStatus::Open,
        }
    }

    #[test]
    fn linked_and_unlinked_are_partitioned() {
        let registry = registry();
        let index = AddressIndex::from_records(&registry);
        let matcher = Matcher::new(&index, 0.6, true);

        let events = vec![violation("12 Elm Street"), violation("99 Nowhere Blvd")];
        let (linked, report) = link_violations(&events, &matcher);

        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].property_key, "k1");
        assert_eq!(report.rows_unlinked, 1);
        assert_eq!(report.rows_emitted, 1);
        assert_eq!(report.rejections[0].reason.label(), "unlinked_address");
    }

    #[test]
    fn pre_linked_events_pass_through() {
        let registry = registry();
        let index = AddressIndex::from_records(&registry);
        let matcher = Matcher::new(&index, 0.6, true);

        let mut event = violation("totally unmatchable");
        event.property_key = Some("k1".into());
        let (linked, report) = link_violations(&[event], &matcher);

        assert_eq!(linked.len(), 1);
        assert_eq!(report.rows_unlinked, 0);
    }
}
