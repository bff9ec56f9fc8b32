//! District assignment and summary aggregation.

use std::collections::BTreeMap;

use tracing::warn;
use ward_core::entities::DistrictRiskSummary;
use ward_core::quality::QualityReport;

use crate::geojson::DistrictPolygon;

/// A property as the spatial stage sees it: a scored point with optional
/// coordinates and an optional declared-district attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskPoint {
    pub property_key: String,
    pub score: f64,
    /// Whether the property's landlord was flagged by the risk stage.
    pub flagged: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub district_attr: Option<String>,
}

/// Global counters for one aggregation run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SpatialOutcome {
    /// Properties placed by polygon containment.
    pub polygon_assigned: usize,
    /// Properties placed by the declared-district attribute fallback.
    pub attribute_assigned: usize,
    /// Properties in no bucket at all: no polygon hit, no attribute.
    pub unmatched_count: usize,
    /// Points that fell inside more than one polygon.
    pub ambiguous_count: usize,
}

#[derive(Debug, Default)]
struct Bucket {
    total_score: f64,
    property_count: usize,
    flagged_count: usize,
    fallback_count: usize,
}

/// Aggregate risk points into per-district summaries.
///
/// Polygon containment is authoritative; the declared attribute is a
/// fallback for points with no coordinates or no polygon hit. Summaries are
/// sorted by total score descending (district id breaking ties), and no
/// property ever disappears: bucket counts plus `unmatched_count` always
/// add back up to the input count.
#[must_use]
pub fn aggregate_districts(
    points: &[RiskPoint],
    districts: &[DistrictPolygon],
) -> (Vec<DistrictRiskSummary>, SpatialOutcome, QualityReport) {
    let mut report = QualityReport::new("spatial");
    report.rows_seen = points.len();
    report.rows_emitted = points.len();

    let mut outcome = SpatialOutcome::default();
    let mut buckets: BTreeMap<String, Bucket> = BTreeMap::new();

    for point in points {
        let polygon_hit = locate(point, districts, &mut outcome);
        let (district_id, via_fallback) = match polygon_hit {
            Some(district_id) => {
                outcome.polygon_assigned += 1;
                (district_id, false)
            }
            None => match point.district_attr.as_deref() {
                Some(attr) if !attr.trim().is_empty() => {
                    outcome.attribute_assigned += 1;
                    (attr.trim().to_string(), true)
                }
                _ => {
                    outcome.unmatched_count += 1;
                    report.rows_unlinked += 1;
                    continue;
                }
            },
        };

        let bucket = buckets.entry(district_id).or_default();
        bucket.total_score += point.score;
        bucket.property_count += 1;
        if point.flagged {
            bucket.flagged_count += 1;
        }
        if via_fallback {
            bucket.fallback_count += 1;
        }
    }

    report.ambiguous_matches = outcome.ambiguous_count;

    let mut summaries: Vec<DistrictRiskSummary> = buckets
        .into_iter()
        .map(|(district_id, bucket)| {
            #[allow(clippy::cast_precision_loss)]
            let mean_score = if bucket.property_count == 0 {
                0.0
            } else {
                bucket.total_score / bucket.property_count as f64
            };
            DistrictRiskSummary {
                district_id,
                mean_score,
                total_score: bucket.total_score,
                property_count: bucket.property_count,
                flagged_count: bucket.flagged_count,
                fallback_count: bucket.fallback_count,
            }
        })
        .collect();

    summaries.sort_by(|a, b| {
        b.total_score
            .partial_cmp(&a.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.district_id.cmp(&b.district_id))
    });

    (summaries, outcome, report)
}

/// Point-in-polygon lookup in boundary input order. More than one hit is a
/// data-quality warning; the first polygon wins deterministically.
fn locate(
    point: &RiskPoint,
    districts: &[DistrictPolygon],
    outcome: &mut SpatialOutcome,
) -> Option<String> {
    let (Some(latitude), Some(longitude)) = (point.latitude, point.longitude) else {
        return None;
    };

    let mut hits = districts
        .iter()
        .filter(|district| district.contains(longitude, latitude));
    let first = hits.next()?;
    let extra: Vec<&str> = hits.map(|d| d.district_id.as_str()).collect();
    if !extra.is_empty() {
        outcome.ambiguous_count += 1;
        warn!(
            property = %point.property_key,
            district = %first.district_id,
            also_matched = ?extra,
            "point inside multiple district polygons; keeping first in input order"
        );
    }
    Some(first.district_id.clone())
}
