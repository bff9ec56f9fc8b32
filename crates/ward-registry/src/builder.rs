//! Multi-source registry construction.
//!
//! Records are merged on their normalized address; the canonical key form
//! depends on corroboration. An address seen by two or more source datasets
//! gets an address-derived digest key; a single-source record keeps a
//! synthesized `source:native_id` key and is marked `unmatched`: present,
//! never dropped, just not linked across sources.

use std::collections::{BTreeMap, HashMap};

use tracing::warn;
use ward_core::entities::PropertyRecord;
use ward_core::enums::SourceDataset;
use ward_core::keys::{property_key, synthesized_key};
use ward_core::quality::QualityReport;
use ward_normalize::address::normalize_address;

use crate::error::RegistryError;

/// One merged property-in-progress.
#[derive(Debug)]
struct Entry {
    address: String,
    normalized_address: String,
    district: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    landlord: Option<String>,
    source_ids: BTreeMap<SourceDataset, Vec<String>>,
    first_source: SourceDataset,
    first_native_id: String,
}

impl Entry {
    fn new(source: SourceDataset, native_id: &str, address: &str, normalized: String) -> Self {
        Self {
            address: address.trim().to_string(),
            normalized_address: normalized,
            district: None,
            latitude: None,
            longitude: None,
            landlord: None,
            source_ids: BTreeMap::new(),
            first_source: source,
            first_native_id: native_id.trim().to_string(),
        }
    }

    /// First non-empty value wins for every merged attribute; insertion
    /// order is the source priority order the caller chose.
    fn absorb(
        &mut self,
        source: SourceDataset,
        native_id: &str,
        district: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        landlord: Option<&str>,
    ) {
        let ids = self.source_ids.entry(source).or_default();
        let native_id = native_id.trim().to_string();
        if !ids.contains(&native_id) {
            ids.push(native_id);
        }
        if self.district.is_none() {
            self.district = non_empty(district);
        }
        if self.latitude.is_none() {
            self.latitude = latitude;
        }
        if self.longitude.is_none() {
            self.longitude = longitude;
        }
        if self.landlord.is_none() {
            self.landlord = non_empty(landlord);
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Accumulates records from every source, then finalizes into a sorted
/// registry with unique keys.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<Entry>,
    by_address: HashMap<String, usize>,
    rows_seen: usize,
}

impl RegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one normalized source record into the registry.
    ///
    /// Records whose address normalizes to nothing stay standalone: they can
    /// never merge, and finalize under a synthesized key.
    #[allow(clippy::too_many_arguments)]
    pub fn insert(
        &mut self,
        source: SourceDataset,
        native_id: &str,
        address: &str,
        district: Option<&str>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        landlord: Option<&str>,
    ) {
        self.rows_seen += 1;
        let normalized = normalize_address(address);

        let index = if normalized.is_empty() {
            self.entries
                .push(Entry::new(source, native_id, address, normalized));
            self.entries.len() - 1
        } else if let Some(&index) = self.by_address.get(&normalized) {
            index
        } else {
            self.entries
                .push(Entry::new(source, native_id, address, normalized.clone()));
            let index = self.entries.len() - 1;
            self.by_address.insert(normalized, index);
            index
        };

        self.entries[index].absorb(source, native_id, district, latitude, longitude, landlord);
    }

    /// Finalize the registry: assign keys, sort, and report.
    ///
    /// # Errors
    ///
    /// `RegistryError::NoRecords` when nothing was inserted.
    pub fn build(self) -> Result<(Vec<PropertyRecord>, QualityReport), RegistryError> {
        if self.entries.is_empty() {
            return Err(RegistryError::NoRecords);
        }

        let mut report = QualityReport::new("registry");
        report.rows_seen = self.rows_seen;

        let mut records: BTreeMap<String, PropertyRecord> = BTreeMap::new();
        for entry in self.entries {
            let corroborated = entry.source_ids.len() >= 2 && !entry.normalized_address.is_empty();
            let (key, unmatched) = if corroborated {
                let district_norm = entry
                    .district
                    .as_deref()
                    .map(normalize_address)
                    .unwrap_or_default();
                (property_key(&entry.normalized_address, &district_norm), false)
            } else {
                report.rows_unlinked += 1;
                (
                    synthesized_key(entry.first_source, &entry.first_native_id),
                    true,
                )
            };

            let record = PropertyRecord {
                property_key: key.clone(),
                address: entry.address,
                normalized_address: entry.normalized_address,
                district: entry.district,
                latitude: entry.latitude,
                longitude: entry.longitude,
                landlord: entry.landlord,
                source_ids: entry.source_ids,
                unmatched,
            };

            if let Some(existing) = records.get_mut(&key) {
                // Key collisions should be impossible; fold the sources
                // together rather than losing a record.
                warn!(key = %key, "property key collision; merging source ids");
                for (source, ids) in record.source_ids {
                    for id in ids {
                        existing.add_source_id(source, id);
                    }
                }
            } else {
                records.insert(key, record);
            }
        }

        report.rows_emitted = records.len();
        Ok((records.into_values().collect(), report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn corroborated_addresses_merge_into_one_record() {
        let mut builder = RegistryBuilder::new();
        builder.insert(
            SourceDataset::StudentHousing,
            "row-1",
            "123 Main St Apt 4",
            None,
            Some(42.35),
            Some(-71.06),
            None,
        );
        builder.insert(
            SourceDataset::Sam,
            "S77",
            "123 main street, apt 4",
            None,
            None,
            None,
            None,
        );

        let (records, report) = builder.build().unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.source_ids.len(), 2);
        assert!(!record.unmatched);
        // Digest key, not a synthesized one.
        assert!(!record.property_key.contains(':'));
        // First-seen coordinates survive the merge.
        assert_eq!(record.latitude, Some(42.35));
        assert_eq!(report.rows_seen, 2);
        assert_eq!(report.rows_emitted, 1);
    }

    #[test]
    fn single_source_records_get_synthesized_keys() {
        let mut builder = RegistryBuilder::new();
        builder.insert(
            SourceDataset::Assessment,
            "P9",
            "77 Lone Rd",
            None,
            None,
            None,
            Some("ACME"),
        );

        let (records, report) = builder.build().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].property_key, "assessment:P9");
        assert!(records[0].unmatched);
        assert_eq!(report.rows_unlinked, 1);
    }

    #[test]
    fn every_input_record_lands_in_exactly_one_property() {
        let mut builder = RegistryBuilder::new();
        builder.insert(SourceDataset::StudentHousing, "row-1", "1 A St", None, None, None, None);
        builder.insert(SourceDataset::Sam, "S1", "1 A Street", None, None, None, None);
        builder.insert(SourceDataset::Sam, "S2", "2 B St", None, None, None, None);
        builder.insert(SourceDataset::Assessment, "P1", "3 C St", None, None, None, None);

        let (records, _) = builder.build().unwrap();
        let total_ids: usize = records
            .iter()
            .map(|r| r.source_ids.values().map(Vec::len).sum::<usize>())
            .sum();
        assert_eq!(total_ids, 4);

        let mut keys: Vec<&str> = records.iter().map(|r| r.property_key.as_str()).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), records.len(), "keys must be unique");
    }

    #[test]
    fn first_non_empty_attribute_wins() {
        let mut builder = RegistryBuilder::new();
        builder.insert(
            SourceDataset::StudentHousing,
            "row-1",
            "5 Hill St",
            None,
            None,
            None,
            None,
        );
        builder.insert(
            SourceDataset::Sam,
            "S5",
            "5 Hill Street",
            Some("D2"),
            Some(42.0),
            Some(-71.0),
            None,
        );
        builder.insert(
            SourceDataset::Assessment,
            "P5",
            "5 Hill St",
            Some("D9"),
            None,
            None,
            Some("ACME"),
        );

        let (records, _) = builder.build().unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.district.as_deref(), Some("D2"));
        assert_eq!(record.landlord.as_deref(), Some("ACME"));
        assert_eq!(record.latitude, Some(42.0));
    }

    #[test]
    fn unkeyable_addresses_stay_standalone() {
        let mut builder = RegistryBuilder::new();
        builder.insert(SourceDataset::Sam, "S1", "##", None, None, None, None);
        builder.insert(SourceDataset::Sam, "S2", "##", None, None, None, None);

        let (records, _) = builder.build().unwrap();
        // Identical junk addresses do not merge; each keeps its own
        // synthesized key.
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.unmatched));
    }

    #[test]
    fn empty_builder_is_fatal() {
        assert!(matches!(
            RegistryBuilder::new().build(),
            Err(RegistryError::NoRecords)
        ));
    }

    #[test]
    fn output_is_sorted_by_key() {
        let mut builder = RegistryBuilder::new();
        builder.insert(SourceDataset::Sam, "Z", "9 Z St", None, None, None, None);
        builder.insert(SourceDataset::Sam, "A", "1 A St", None, None, None, None);

        let (records, _) = builder.build().unwrap();
        let keys: Vec<&str> = records.iter().map(|r| r.property_key.as_str()).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }
}
