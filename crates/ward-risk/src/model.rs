//! Property-level scoring.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use tracing::warn;
use ward_core::entities::{PropertyRecord, RiskScore};
use ward_core::enums::EventKind;

use crate::decay::decay;
use crate::error::RiskError;
use crate::link::LinkedEvent;
use crate::params::RiskParams;

/// Score every registry property from its linked events.
///
/// Scores decay relative to `as_of`, an explicit externally supplied date:
/// runs are reproducible because nothing here reads the wall clock. Output
/// order follows the registry (sorted by key). Properties with no events
/// score 0.0.
///
/// # Errors
///
/// `RiskError::EmptyRegistry` when `registry` is empty.
pub fn score_properties(
    registry: &[PropertyRecord],
    events: &[LinkedEvent],
    params: &RiskParams,
    as_of: NaiveDate,
) -> Result<Vec<RiskScore>, RiskError> {
    if registry.is_empty() {
        return Err(RiskError::EmptyRegistry);
    }

    #[derive(Default)]
    struct Accumulator {
        violation_score: f64,
        service_score: f64,
        violation_events: usize,
        service_events: usize,
    }

    let known_keys: HashSet<&str> = registry
        .iter()
        .map(|record| record.property_key.as_str())
        .collect();

    let mut by_property: HashMap<&str, Accumulator> = HashMap::new();
    for event in events {
        if !known_keys.contains(event.property_key.as_str()) {
            // Linked keys come from the registry's own index, so this is a
            // caller bug, not a data problem; skip rather than fabricate.
            warn!(key = %event.property_key, "event linked to unknown property key; skipped");
            continue;
        }
        let age_days = (as_of - event.date).num_days();
        let contribution = params.weights.weight(event.severity) * decay(age_days, params.half_life_days);
        let accumulator = by_property.entry(event.property_key.as_str()).or_default();
        match event.kind {
            EventKind::Violation => {
                accumulator.violation_score += contribution;
                accumulator.violation_events += 1;
            }
            EventKind::ServiceRequest => {
                accumulator.service_score += contribution;
                accumulator.service_events += 1;
            }
        }
    }

    let scores = registry
        .iter()
        .map(|record| {
            by_property.get(record.property_key.as_str()).map_or_else(
                || RiskScore::zero(&record.property_key),
                |acc| RiskScore {
                    property_key: record.property_key.clone(),
                    score: acc.violation_score + params.service_multiplier * acc.service_score,
                    violation_score: acc.violation_score,
                    service_score: acc.service_score,
                    violation_events: acc.violation_events,
                    service_events: acc.service_events,
                },
            )
        })
        .collect();

    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;
    use ward_core::enums::{Severity, SourceDataset};

    fn property(key: &str) -> PropertyRecord {
        let mut source_ids = BTreeMap::new();
        source_ids.insert(SourceDataset::Sam, vec![key.to_string()]);
        PropertyRecord {
            property_key: key.into(),
            address: format!("{key} address"),
            normalized_address: format!("{key} address"),
            district: None,
            latitude: None,
            longitude: None,
            landlord: None,
            source_ids,
            unmatched: false,
        }
    }

    fn event(key: &str, date: NaiveDate, severity: Severity, kind: EventKind) -> LinkedEvent {
        LinkedEvent {
            property_key: key.into(),
            date,
            severity,
            kind,
        }
    }

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
    }

    #[test]
    fn reference_scenario_scores_ten_point_five() {
        // Severity 5 at age 0 with weight 10 contributes exactly 10.0; a
        // severity 1 violation (weight 2) at two half-lives contributes
        // 2 * 0.25 = 0.5.
        let registry = vec![property("p1")];
        let params = RiskParams::default();
        let events = vec![
            event("p1", as_of(), Severity::Critical, EventKind::Violation),
            event(
                "p1",
                as_of() - chrono::Days::new(360),
                Severity::Low,
                EventKind::Violation,
            ),
        ];

        let scores = score_properties(&registry, &events, &params, as_of()).unwrap();
        assert_eq!(scores.len(), 1);
        assert!((scores[0].score - 10.5).abs() < 1e-9);
        assert_eq!(scores[0].contributing_events(), 2);
    }

    #[test]
    fn score_is_monotone_in_severity_at_fixed_age() {
        let registry = vec![property("p1"), property("p2")];
        let params = RiskParams::default();
        let date = as_of() - chrono::Days::new(90);
        let low = vec![event("p1", date, Severity::Moderate, EventKind::Violation)];
        let high = vec![event("p2", date, Severity::Severe, EventKind::Violation)];

        let low_scores = score_properties(&registry, &low, &params, as_of()).unwrap();
        let high_scores = score_properties(&registry, &high, &params, as_of()).unwrap();
        assert!(high_scores[1].score > low_scores[0].score);
    }

    #[test]
    fn score_is_monotone_in_age_at_fixed_severity() {
        let registry = vec![property("p1")];
        let params = RiskParams::default();
        let young = vec![event(
            "p1",
            as_of() - chrono::Days::new(10),
            Severity::High,
            EventKind::Violation,
        )];
        let old = vec![event(
            "p1",
            as_of() - chrono::Days::new(1000),
            Severity::High,
            EventKind::Violation,
        )];

        let young_score = score_properties(&registry, &young, &params, as_of()).unwrap()[0].score;
        let old_score = score_properties(&registry, &old, &params, as_of()).unwrap()[0].score;
        assert!(young_score > old_score);
        assert!(old_score > 0.0);
    }

    #[test]
    fn service_requests_count_at_the_multiplier() {
        let registry = vec![property("p1"), property("p2")];
        let params = RiskParams::default();
        let date = as_of();
        let as_violation = vec![event("p1", date, Severity::High, EventKind::Violation)];
        let as_request = vec![event("p2", date, Severity::High, EventKind::ServiceRequest)];

        let violation_score =
            score_properties(&registry, &as_violation, &params, as_of()).unwrap()[0].score;
        let request_score =
            score_properties(&registry, &as_request, &params, as_of()).unwrap()[1].score;
        assert!((request_score - params.service_multiplier * violation_score).abs() < 1e-12);
    }

    #[test]
    fn zero_events_is_zero_score_not_an_error() {
        let registry = vec![property("p1")];
        let scores =
            score_properties(&registry, &[], &RiskParams::default(), as_of()).unwrap();
        assert_eq!(scores[0].score, 0.0);
        assert_eq!(scores[0].contributing_events(), 0);
    }

    #[test]
    fn empty_registry_is_fatal() {
        assert!(matches!(
            score_properties(&[], &[], &RiskParams::default(), as_of()),
            Err(RiskError::EmptyRegistry)
        ));
    }

    #[test]
    fn adding_an_event_never_decreases_the_score() {
        let registry = vec![property("p1")];
        let params = RiskParams::default();
        let base = vec![event("p1", as_of(), Severity::Moderate, EventKind::Violation)];
        let mut more = base.clone();
        more.push(event(
            "p1",
            as_of() - chrono::Days::new(3000),
            Severity::Low,
            EventKind::Violation,
        ));

        let base_score = score_properties(&registry, &base, &params, as_of()).unwrap()[0].score;
        let more_score = score_properties(&registry, &more, &params, as_of()).unwrap()[0].score;
        assert!(more_score > base_score);
    }
}
