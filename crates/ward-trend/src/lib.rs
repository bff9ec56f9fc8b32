//! # ward-trend
//!
//! The Trend Aggregator: yearly district-level student-housing
//! concentration. A plain group-by over normalized survey rows: no decay,
//! no spatial join, no shared machinery with the risk stages.

use std::collections::BTreeMap;

use thiserror::Error;
use ward_core::entities::{StudentHousingRecord, TrendRow};

#[derive(Debug, Error)]
pub enum TrendError {
    /// Nothing to aggregate; the stage aborts rather than writing an empty
    /// trend table.
    #[error("No student-housing records to aggregate")]
    NoRecords,
}

/// Bucket label for rows missing a year or district.
const UNKNOWN: &str = "UNKNOWN";

/// Group records by (year, district) and derive per-cell ratios.
///
/// Output is sorted by year then district; rows missing either dimension
/// are counted under `UNKNOWN` rather than dropped.
///
/// # Errors
///
/// `TrendError::NoRecords` when `records` is empty.
pub fn aggregate_trend(records: &[StudentHousingRecord]) -> Result<Vec<TrendRow>, TrendError> {
    if records.is_empty() {
        return Err(TrendError::NoRecords);
    }

    #[derive(Default)]
    struct Cell {
        records: usize,
        students: u64,
        units: u64,
    }

    let mut cells: BTreeMap<(String, String), Cell> = BTreeMap::new();
    for record in records {
        let year = record
            .year
            .map_or_else(|| UNKNOWN.to_string(), |y| y.to_string());
        let district = record
            .district
            .as_deref()
            .map_or_else(|| UNKNOWN.to_string(), |d| d.trim().to_string());

        let cell = cells.entry((year, district)).or_default();
        cell.records += 1;
        cell.students += u64::from(record.student_count.unwrap_or(0));
        cell.units += u64::from(record.units.unwrap_or(0));
    }

    Ok(cells
        .into_iter()
        .map(|((year, district), cell)| {
            #[allow(clippy::cast_precision_loss)]
            let students_per_unit = if cell.units == 0 {
                0.0
            } else {
                cell.students as f64 / cell.units as f64
            };
            TrendRow {
                year,
                district,
                records: cell.records,
                students: cell.students,
                units: cell.units,
                students_per_unit,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(
        district: Option<&str>,
        year: Option<i32>,
        students: Option<u32>,
        units: Option<u32>,
    ) -> StudentHousingRecord {
        StudentHousingRecord {
            address: "12 Elm St".into(),
            district: district.map(Into::into),
            year,
            student_count: students,
            units,
            landlord: None,
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn groups_by_year_and_district() {
        let records = vec![
            record(Some("D1"), Some(2019), Some(10), Some(5)),
            record(Some("D1"), Some(2019), Some(6), Some(3)),
            record(Some("D2"), Some(2019), Some(4), Some(2)),
            record(Some("D1"), Some(2020), Some(9), Some(3)),
        ];

        let rows = aggregate_trend(&records).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].year, "2019");
        assert_eq!(rows[0].district, "D1");
        assert_eq!(rows[0].records, 2);
        assert_eq!(rows[0].students, 16);
        assert_eq!(rows[0].units, 8);
        assert!((rows[0].students_per_unit - 2.0).abs() < 1e-12);
    }

    #[test]
    fn missing_dimensions_bucket_under_unknown() {
        let records = vec![
            record(None, Some(2019), Some(4), Some(2)),
            record(Some("D1"), None, Some(3), None),
        ];

        let rows = aggregate_trend(&records).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].year, "2019");
        assert_eq!(rows[0].district, "UNKNOWN");
        assert_eq!(rows[1].year, "UNKNOWN");
        assert_eq!(rows[1].district, "D1");
    }

    #[test]
    fn zero_units_gives_zero_ratio() {
        let records = vec![record(Some("D1"), Some(2019), Some(12), None)];
        let rows = aggregate_trend(&records).unwrap();
        assert_eq!(rows[0].units, 0);
        assert_eq!(rows[0].students_per_unit, 0.0);
    }

    #[test]
    fn empty_input_is_fatal() {
        assert!(matches!(aggregate_trend(&[]), Err(TrendError::NoRecords)));
    }

    #[test]
    fn output_is_sorted_by_year_then_district() {
        let records = vec![
            record(Some("D2"), Some(2020), None, None),
            record(Some("D1"), Some(2020), None, None),
            record(Some("D9"), Some(2019), None, None),
        ];
        let rows = aggregate_trend(&records).unwrap();
        let keys: Vec<(String, String)> = rows
            .iter()
            .map(|r| (r.year.clone(), r.district.clone()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2019".to_string(), "D9".to_string()),
                ("2020".to_string(), "D1".to_string()),
                ("2020".to_string(), "D2".to_string()),
            ]
        );
    }
}
