//! Landlord-level aggregation.

use std::collections::BTreeMap;
use std::collections::HashMap;

use ward_core::entities::{LandlordRiskScore, PropertyRecord, RiskScore};

use crate::params::RiskParams;

/// Aggregate property scores by landlord identity.
///
/// Properties with no landlord identity are excluded here but remain in the
/// property-level output. `aggregate_score` is the plain sum of property
/// scores; a landlord is flagged when the sum meets the configured
/// threshold. Output is sorted by aggregate score descending, then landlord
/// name, so ties are stable across runs.
#[must_use]
pub fn aggregate_landlords(
    registry: &[PropertyRecord],
    scores: &[RiskScore],
    params: &RiskParams,
) -> Vec<LandlordRiskScore> {
    let score_by_key: HashMap<&str, &RiskScore> = scores
        .iter()
        .map(|score| (score.property_key.as_str(), score))
        .collect();

    // BTreeMap groups deterministically by landlord name.
    let mut grouped: BTreeMap<&str, LandlordRiskScore> = BTreeMap::new();
    for record in registry {
        let Some(landlord) = record.landlord.as_deref() else {
            continue;
        };
        let Some(score) = score_by_key.get(record.property_key.as_str()) else {
            continue;
        };

        let entry = grouped
            .entry(landlord)
            .or_insert_with(|| LandlordRiskScore {
                landlord: landlord.to_string(),
                aggregate_score: 0.0,
                property_count: 0,
                violation_events: 0,
                service_events: 0,
                flagged: false,
            });
        entry.aggregate_score += score.score;
        entry.property_count += 1;
        entry.violation_events += score.violation_events;
        entry.service_events += score.service_events;
    }

    let mut landlords: Vec<LandlordRiskScore> = grouped
        .into_values()
        .map(|mut landlord| {
            landlord.flagged = landlord.aggregate_score >= params.landlord_flag_threshold;
            landlord
        })
        .collect();

    landlords.sort_by(|a, b| {
        b.aggregate_score
            .partial_cmp(&a.aggregate_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.landlord.cmp(&b.landlord))
    });
    landlords
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap as SourceMap;
    use ward_core::enums::SourceDataset;

    fn property(key: &str, landlord: Option<&str>) -> PropertyRecord {
        let mut source_ids = SourceMap::new();
        source_ids.insert(SourceDataset::Assessment, vec![key.to_string()]);
        PropertyRecord {
            property_key: key.into(),
            address: format!("{key} address"),
            normalized_address: format!("{key} address"),
            district: None,
            latitude: None,
            longitude: None,
            landlord: landlord.map(Into::into),
            source_ids,
            unmatched: false,
        }
    }

    fn score(key: &str, value: f64) -> RiskScore {
        RiskScore {
            property_key: key.into(),
            score: value,
            violation_score: value,
            service_score: 0.0,
            violation_events: 1,
            service_events: 0,
        }
    }

    #[test]
    fn aggregates_and_flags_over_threshold() {
        let registry = vec![
            property("p1", Some("ACME Realty")),
            property("p2", Some("ACME Realty")),
            property("p3", Some("Smallholder")),
        ];
        let scores = vec![score("p1", 4.0), score("p2", 3.0), score("p3", 1.0)];
        let params = RiskParams::default(); // threshold 6.0

        let landlords = aggregate_landlords(&registry, &scores, &params);
        assert_eq!(landlords.len(), 2);
        assert_eq!(landlords[0].landlord, "ACME Realty");
        assert!((landlords[0].aggregate_score - 7.0).abs() < 1e-12);
        assert!(landlords[0].flagged);
        assert_eq!(landlords[0].property_count, 2);
        assert!(!landlords[1].flagged);
    }

    #[test]
    fn threshold_is_inclusive() {
        let registry = vec![property("p1", Some("Edge LLC"))];
        let scores = vec![score("p1", 6.0)];
        let landlords = aggregate_landlords(&registry, &scores, &RiskParams::default());
        assert!(landlords[0].flagged);
    }

    #[test]
    fn landlordless_properties_are_excluded() {
        let registry = vec![property("p1", None), property("p2", Some("ACME"))];
        let scores = vec![score("p1", 10.0), score("p2", 1.0)];
        let landlords = aggregate_landlords(&registry, &scores, &RiskParams::default());
        assert_eq!(landlords.len(), 1);
        assert_eq!(landlords[0].landlord, "ACME");
    }

    #[test]
    fn equal_scores_sort_by_name() {
        let registry = vec![property("p1", Some("Zeta")), property("p2", Some("Alpha"))];
        let scores = vec![score("p1", 2.0), score("p2", 2.0)];
        let landlords = aggregate_landlords(&registry, &scores, &RiskParams::default());
        assert_eq!(landlords[0].landlord, "Alpha");
        assert_eq!(landlords[1].landlord, "Zeta");
    }
}
