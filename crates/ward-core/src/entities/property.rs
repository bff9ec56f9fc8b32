use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::enums::SourceDataset;

/// One physical property, merged from every source record that resolved to
/// the same canonical key.
///
/// Invariants: `property_key` is unique within a registry, and `source_ids`
/// is never empty: a record that fails to link still lands here under a
/// synthesized key with `unmatched = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub property_key: String,
    /// Raw address as first seen in source data.
    pub address: String,
    pub normalized_address: String,
    /// Declared council district attribute, when any source carried one.
    pub district: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Landlord identity from assessment data (or the student-housing
    /// survey's owner column). Absent means the property is excluded from
    /// landlord-level aggregation only.
    pub landlord: Option<String>,
    /// Native ids per contributing source dataset. BTreeMap keeps output
    /// ordering stable across runs.
    pub source_ids: BTreeMap<SourceDataset, Vec<String>>,
    /// True when only a synthesized fallback key could be produced.
    pub unmatched: bool,
}

impl PropertyRecord {
    /// Pipe-joined source names in source priority order, the `sources`
    /// output column.
    #[must_use]
    pub fn sources_column(&self) -> String {
        self.source_ids
            .keys()
            .map(|source| source.as_str())
            .collect::<Vec<_>>()
            .join("|")
    }

    /// Record a native id under a source dataset, skipping duplicates.
    pub fn add_source_id(&mut self, source: SourceDataset, native_id: impl Into<String>) {
        let native_id = native_id.into();
        let ids = self.source_ids.entry(source).or_default();
        if !ids.contains(&native_id) {
            ids.push(native_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record() -> PropertyRecord {
        PropertyRecord {
            property_key: "abc123def456".into(),
            address: "123 Main St".into(),
            normalized_address: "123 main st".into(),
            district: None,
            latitude: None,
            longitude: None,
            landlord: None,
            source_ids: BTreeMap::new(),
            unmatched: false,
        }
    }

    #[test]
    fn sources_column_is_piped_in_priority_order() {
        let mut rec = record();
        rec.add_source_id(SourceDataset::Sam, "s-1");
        rec.add_source_id(SourceDataset::StudentHousing, "row-4");
        assert_eq!(rec.sources_column(), "student_housing|sam");
    }

    #[test]
    fn duplicate_native_ids_are_not_recorded_twice() {
        let mut rec = record();
        rec.add_source_id(SourceDataset::Sam, "s-1");
        rec.add_source_id(SourceDataset::Sam, "s-1");
        assert_eq!(rec.source_ids[&SourceDataset::Sam], vec!["s-1".to_string()]);
    }
}
