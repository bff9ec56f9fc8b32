//! Per-dataset normalizers.
//!
//! Each normalizer takes a [`crate::RawTable`] and returns typed records
//! plus a `QualityReport`. The conservation law holds for every dataset:
//! rows emitted + rows rejected + rows deduplicated = rows seen.

pub mod assessment;
pub mod sam;
pub mod service311;
pub mod student_housing;
pub mod violations;

/// District column aliases shared across datasets.
pub(crate) const DISTRICT_CANDIDATES: &[&str] =
    &["district", "city_council_district", "council_district"];

/// Date column aliases shared by the event datasets.
pub(crate) const DATE_CANDIDATES: &[&str] = &[
    "date",
    "date_issued",
    "violation_date",
    "violdttm",
    "open_dt",
    "closed_dt",
    "requested_datetime",
    "request_date",
    "issued_date",
    "event_date",
];

/// Collapse duplicates by natural key, keeping the last-seen row (input
/// order is fetch order, so last wins as the most recent snapshot).
/// Survivors keep their positional order; returns the number collapsed.
pub(crate) fn dedup_last<T>(keyed: Vec<(String, T)>) -> (Vec<T>, usize) {
    use std::collections::HashMap;

    let mut slots: Vec<Option<T>> = Vec::with_capacity(keyed.len());
    let mut index_by_key: HashMap<String, usize> = HashMap::with_capacity(keyed.len());
    let mut collapsed = 0usize;

    for (key, item) in keyed {
        if let Some(&previous) = index_by_key.get(&key) {
            slots[previous] = None;
            collapsed += 1;
        }
        index_by_key.insert(key, slots.len());
        slots.push(Some(item));
    }

    (slots.into_iter().flatten().collect(), collapsed)
}
