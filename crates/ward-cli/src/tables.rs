//! CSV readers and writers for pipeline artifacts.
//!
//! Column order and naming are stable across runs; downstream consumers
//! key on the header row. Scores are written with four decimal places;
//! everything else round-trips losslessly so re-running a stage on
//! unchanged inputs reproduces byte-identical output.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, bail};
use ward_core::entities::{
    DistrictRiskSummary, LandlordRiskScore, PropertyRecord, StudentHousingRecord, TrendRow,
};
use ward_core::enums::SourceDataset;
use ward_normalize::RawTable;
use ward_spatial::RiskPoint;

pub const STUDENT_CLEAN_COLUMNS: &[&str] = &[
    "address",
    "district",
    "year",
    "student_count",
    "units",
    "landlord",
    "latitude",
    "longitude",
];

pub const REGISTRY_COLUMNS: &[&str] = &[
    "property_key",
    "sources",
    "source_ids",
    "address",
    "normalized_address",
    "district",
    "latitude",
    "longitude",
    "landlord",
    "unmatched",
];

pub const PROPERTY_RISK_COLUMNS: &[&str] = &[
    "property_key",
    "address",
    "district",
    "landlord",
    "latitude",
    "longitude",
    "violation_events",
    "service_311_events",
    "violation_score",
    "service_311_score",
    "risk_score",
    "flagged_landlord",
];

pub const LANDLORD_RISK_COLUMNS: &[&str] = &[
    "landlord",
    "properties",
    "risk_score",
    "violation_events",
    "service_311_events",
    "flagged",
];

pub const DISTRICT_RISK_COLUMNS: &[&str] = &[
    "district",
    "properties",
    "total_risk",
    "mean_risk",
    "flagged_properties",
    "unmatched_fallback",
];

pub const TREND_COLUMNS: &[&str] = &[
    "year",
    "district",
    "records",
    "students",
    "units",
    "students_per_unit",
];

/// One row of the property risk table: registry metadata joined with the
/// property's score.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyRiskRow {
    pub property_key: String,
    pub address: String,
    pub district: Option<String>,
    pub landlord: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub violation_events: usize,
    pub service_events: usize,
    pub violation_score: f64,
    pub service_score: f64,
    pub risk_score: f64,
    pub flagged_landlord: bool,
}

impl PropertyRiskRow {
    /// The spatial stage's view of this row.
    #[must_use]
    pub fn to_risk_point(&self) -> RiskPoint {
        RiskPoint {
            property_key: self.property_key.clone(),
            score: self.risk_score,
            flagged: self.flagged_landlord,
            latitude: self.latitude,
            longitude: self.longitude,
            district_attr: self.district.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Writers
// ---------------------------------------------------------------------------

pub fn write_student_clean(
    path: &Path,
    records: &[StudentHousingRecord],
) -> anyhow::Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(STUDENT_CLEAN_COLUMNS)?;
    for record in records {
        writer.write_record(&[
            record.address.clone(),
            opt_str(record.district.as_deref()),
            opt_display(record.year),
            opt_display(record.student_count),
            opt_display(record.units),
            opt_str(record.landlord.as_deref()),
            opt_display(record.latitude),
            opt_display(record.longitude),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_registry(path: &Path, records: &[PropertyRecord]) -> anyhow::Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(REGISTRY_COLUMNS)?;
    for record in records {
        writer.write_record(&[
            record.property_key.clone(),
            record.sources_column(),
            encode_source_ids(&record.source_ids),
            record.address.clone(),
            record.normalized_address.clone(),
            opt_str(record.district.as_deref()),
            opt_display(record.latitude),
            opt_display(record.longitude),
            opt_str(record.landlord.as_deref()),
            flag(record.unmatched).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_property_risk(path: &Path, rows: &[PropertyRiskRow]) -> anyhow::Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(PROPERTY_RISK_COLUMNS)?;
    for row in rows {
        writer.write_record(&[
            row.property_key.clone(),
            row.address.clone(),
            opt_str(row.district.as_deref()),
            opt_str(row.landlord.as_deref()),
            opt_display(row.latitude),
            opt_display(row.longitude),
            row.violation_events.to_string(),
            row.service_events.to_string(),
            format!("{:.4}", row.violation_score),
            format!("{:.4}", row.service_score),
            format!("{:.4}", row.risk_score),
            flag(row.flagged_landlord).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_landlord_risk(path: &Path, landlords: &[LandlordRiskScore]) -> anyhow::Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(LANDLORD_RISK_COLUMNS)?;
    for landlord in landlords {
        writer.write_record(&[
            landlord.landlord.clone(),
            landlord.property_count.to_string(),
            format!("{:.4}", landlord.aggregate_score),
            landlord.violation_events.to_string(),
            landlord.service_events.to_string(),
            flag(landlord.flagged).to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_district_risk(
    path: &Path,
    summaries: &[DistrictRiskSummary],
) -> anyhow::Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(DISTRICT_RISK_COLUMNS)?;
    for summary in summaries {
        writer.write_record(&[
            summary.district_id.clone(),
            summary.property_count.to_string(),
            format!("{:.4}", summary.total_score),
            format!("{:.4}", summary.mean_score),
            summary.flagged_count.to_string(),
            summary.fallback_count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_trend(path: &Path, rows: &[TrendRow]) -> anyhow::Result<()> {
    let mut writer = open_writer(path)?;
    writer.write_record(TREND_COLUMNS)?;
    for row in rows {
        writer.write_record(&[
            row.year.clone(),
            row.district.clone(),
            row.records.to_string(),
            row.students.to_string(),
            row.units.to_string(),
            format!("{:.2}", row.students_per_unit),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// Read a property registry written by [`write_registry`].
pub fn read_registry(path: &Path) -> anyhow::Result<Vec<PropertyRecord>> {
    let table = RawTable::read(path)?;
    let col = |name: &str| column(&table, name);

    let key_col = col("property_key")?;
    let ids_col = col("source_ids")?;
    let address_col = col("address")?;
    let normalized_col = col("normalized_address")?;
    let district_col = col("district")?;
    let latitude_col = col("latitude")?;
    let longitude_col = col("longitude")?;
    let landlord_col = col("landlord")?;
    let unmatched_col = col("unmatched")?;

    let mut records = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        records.push(PropertyRecord {
            property_key: cell(row, key_col).to_string(),
            address: cell(row, address_col).to_string(),
            normalized_address: cell(row, normalized_col).to_string(),
            district: opt_cell(row, district_col),
            latitude: parse_opt_f64(cell(row, latitude_col)),
            longitude: parse_opt_f64(cell(row, longitude_col)),
            landlord: opt_cell(row, landlord_col),
            source_ids: decode_source_ids(cell(row, ids_col))?,
            unmatched: cell(row, unmatched_col) == "1",
        });
    }
    Ok(records)
}

/// Read a property risk table written by [`write_property_risk`].
pub fn read_property_risk(path: &Path) -> anyhow::Result<Vec<PropertyRiskRow>> {
    let table = RawTable::read(path)?;
    let col = |name: &str| column(&table, name);

    let key_col = col("property_key")?;
    let address_col = col("address")?;
    let district_col = col("district")?;
    let landlord_col = col("landlord")?;
    let latitude_col = col("latitude")?;
    let longitude_col = col("longitude")?;
    let violation_events_col = col("violation_events")?;
    let service_events_col = col("service_311_events")?;
    let violation_score_col = col("violation_score")?;
    let service_score_col = col("service_311_score")?;
    let risk_score_col = col("risk_score")?;
    let flagged_col = col("flagged_landlord")?;

    let mut rows = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        rows.push(PropertyRiskRow {
            property_key: cell(row, key_col).to_string(),
            address: cell(row, address_col).to_string(),
            district: opt_cell(row, district_col),
            landlord: opt_cell(row, landlord_col),
            latitude: parse_opt_f64(cell(row, latitude_col)),
            longitude: parse_opt_f64(cell(row, longitude_col)),
            violation_events: parse_usize(cell(row, violation_events_col))?,
            service_events: parse_usize(cell(row, service_events_col))?,
            violation_score: parse_f64(cell(row, violation_score_col))?,
            service_score: parse_f64(cell(row, service_score_col))?,
            risk_score: parse_f64(cell(row, risk_score_col))?,
            flagged_landlord: cell(row, flagged_col) == "1",
        });
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn open_writer(path: &Path) -> anyhow::Result<csv::Writer<fs::File>> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    csv::Writer::from_path(path)
        .with_context(|| format!("opening output file {}", path.display()))
}

fn column(table: &RawTable, name: &str) -> anyhow::Result<usize> {
    table
        .headers
        .iter()
        .position(|header| header == name)
        .with_context(|| format!("column '{name}' missing from {}", table.path))
}

fn cell<'a>(row: &'a [String], index: usize) -> &'a str {
    row.get(index).map_or("", String::as_str)
}

fn opt_cell(row: &[String], index: usize) -> Option<String> {
    let value = cell(row, index).trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn opt_str(value: Option<&str>) -> String {
    value.unwrap_or_default().to_string()
}

fn opt_display<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(String::new, |v| v.to_string())
}

const fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn parse_opt_f64(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse().ok()
}

fn parse_f64(raw: &str) -> anyhow::Result<f64> {
    raw.trim()
        .parse()
        .with_context(|| format!("invalid number {raw:?}"))
}

fn parse_usize(raw: &str) -> anyhow::Result<usize> {
    raw.trim()
        .parse()
        .with_context(|| format!("invalid count {raw:?}"))
}

/// Encode source ids as `source:id` pairs joined by `|`, in map order, so
/// the column is deterministic and parses back losslessly.
fn encode_source_ids(source_ids: &BTreeMap<SourceDataset, Vec<String>>) -> String {
    let mut parts = Vec::new();
    for (source, ids) in source_ids {
        for id in ids {
            parts.push(format!("{source}:{id}"));
        }
    }
    parts.join("|")
}

fn decode_source_ids(raw: &str) -> anyhow::Result<BTreeMap<SourceDataset, Vec<String>>> {
    let mut source_ids: BTreeMap<SourceDataset, Vec<String>> = BTreeMap::new();
    for part in raw.split('|').filter(|part| !part.is_empty()) {
        let Some((source, id)) = part.split_once(':') else {
            bail!("malformed source id entry {part:?}");
        };
        let Some(source) = SourceDataset::parse(source) else {
            bail!("unknown source dataset {source:?}");
        };
        source_ids.entry(source).or_default().push(id.to_string());
    }
    Ok(source_ids)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn record() -> PropertyRecord {
        let mut source_ids = BTreeMap::new();
        source_ids.insert(SourceDataset::StudentHousing, vec!["row-1".to_string()]);
        source_ids.insert(SourceDataset::Sam, vec!["S1".to_string(), "S2".to_string()]);
        PropertyRecord {
            property_key: "abc123def456".into(),
            address: "12 Elm St".into(),
            normalized_address: "12 elm st".into(),
            district: Some("D4".into()),
            latitude: Some(42.3601),
            longitude: Some(-71.0589),
            landlord: Some("ACME Realty".into()),
            source_ids,
            unmatched: false,
        }
    }

    #[test]
    fn registry_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("registry.csv");
        let records = vec![record()];

        write_registry(&path, &records).unwrap();
        let recovered = read_registry(&path).unwrap();
        assert_eq!(recovered, records);
    }

    #[test]
    fn registry_rewrite_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let first = dir.path().join("a.csv");
        let second = dir.path().join("b.csv");
        let records = vec![record()];

        write_registry(&first, &records).unwrap();
        let recovered = read_registry(&first).unwrap();
        write_registry(&second, &recovered).unwrap();

        let bytes_a = fs::read(&first).unwrap();
        let bytes_b = fs::read(&second).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn property_risk_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("risk.csv");
        let rows = vec![PropertyRiskRow {
            property_key: "abc123def456".into(),
            address: "12 Elm St".into(),
            district: Some("D4".into()),
            landlord: None,
            latitude: Some(42.3601),
            longitude: None,
            violation_events: 3,
            service_events: 1,
            violation_score: 10.0,
            service_score: 1.25,
            risk_score: 10.5,
            flagged_landlord: true,
        }];

        write_property_risk(&path, &rows).unwrap();
        let recovered = read_property_risk(&path).unwrap();
        assert_eq!(recovered, rows);
    }

    #[test]
    fn source_id_encoding_is_stable_and_lossless() {
        let encoded = encode_source_ids(&record().source_ids);
        assert_eq!(encoded, "student_housing:row-1|sam:S1|sam:S2");
        let decoded = decode_source_ids(&encoded).unwrap();
        assert_eq!(decoded, record().source_ids);
    }

    #[test]
    fn header_rows_match_the_constants() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("trend.csv");
        write_trend(&path, &[]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content.lines().next().unwrap(),
            TREND_COLUMNS.join(",")
        );
    }
}
