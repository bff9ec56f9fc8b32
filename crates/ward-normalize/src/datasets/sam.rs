//! SAM address-registry normalization.

use ward_core::entities::SamAddressRecord;
use ward_core::quality::{QualityReport, RejectReason};

use crate::columns::choose_column;
use crate::error::NormalizeError;
use crate::table::RawTable;
use crate::values::parse_coordinate;

use super::{DISTRICT_CANDIDATES, dedup_last};

const ID_CANDIDATES: &[&str] = &["sam_address_id", "sam_id", "native_id", "id"];
const ADDRESS_CANDIDATES: &[&str] = &["address", "full_address", "street_address"];
const LATITUDE_CANDIDATES: &[&str] = &["latitude", "lat", "y", "y_coord"];
const LONGITUDE_CANDIDATES: &[&str] = &["longitude", "lon", "lng", "long", "x", "x_coord"];

/// Normalize SAM rows. Rows without an address are rejected; a missing id
/// column falls back to positional ids so every record still carries a
/// native key for the registry.
///
/// # Errors
///
/// `MissingColumns` when no address column exists under any alias.
pub fn normalize(
    table: &RawTable,
) -> Result<(Vec<SamAddressRecord>, QualityReport), NormalizeError> {
    let mut report = QualityReport::new("normalize/sam");
    if table.is_empty() {
        return Ok((Vec::new(), report));
    }
    report.rows_seen = table.rows.len();

    let Some(address_col) = choose_column(&table.headers, ADDRESS_CANDIDATES) else {
        return Err(NormalizeError::MissingColumns {
            path: table.path.clone(),
            columns: "address".into(),
        });
    };
    let address_col = Some(address_col);

    let id_col = choose_column(&table.headers, ID_CANDIDATES);
    let district_col = choose_column(&table.headers, DISTRICT_CANDIDATES);
    let latitude_col = choose_column(&table.headers, LATITUDE_CANDIDATES);
    let longitude_col = choose_column(&table.headers, LONGITUDE_CANDIDATES);

    let mut keyed = Vec::with_capacity(table.rows.len());
    for (position, row) in table.rows.iter().enumerate() {
        let row_number = position + 1;

        let address = table.cell(row, address_col).trim();
        if address.is_empty() {
            report.reject(row_number, RejectReason::EmptyRequiredField("address".into()));
            continue;
        }

        let id_cell = table.cell(row, id_col).trim();
        let native_id = if id_cell.is_empty() {
            format!("row-{row_number}")
        } else {
            id_cell.to_string()
        };

        let district = {
            let value = table.cell(row, district_col).trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        keyed.push((
            native_id.clone(),
            SamAddressRecord {
                native_id,
                address: address.to_string(),
                district,
                latitude: parse_coordinate(table.cell(row, latitude_col)),
                longitude: parse_coordinate(table.cell(row, longitude_col)),
            },
        ));
    }

    let (records, collapsed) = dedup_last(keyed);
    report.rows_deduplicated = collapsed;
    report.rows_emitted = records.len();
    debug_assert!(report.is_conserved());

    Ok((records, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            path: "sam_addresses.csv".into(),
            headers: headers.iter().map(|s| (*s).into()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| (*s).into()).collect())
                .collect(),
        }
    }

    #[test]
    fn normalizes_with_coordinates() {
        let table = table(
            &["sam_address_id", "full_address", "lat", "long", "district"],
            &[&["S1", "12 Elm St", "42.35", "-71.06", "D4"]],
        );
        let (records, report) = normalize(&table).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].native_id, "S1");
        assert_eq!(records[0].latitude, Some(42.35));
        assert_eq!(records[0].district.as_deref(), Some("D4"));
        assert!(report.is_conserved());
    }

    #[test]
    fn positional_ids_when_id_column_absent() {
        let table = table(&["address"], &[&["12 Elm St"], &["14 Oak St"]]);
        let (records, _) = normalize(&table).unwrap();
        assert_eq!(records[0].native_id, "row-1");
        assert_eq!(records[1].native_id, "row-2");
    }

    #[test]
    fn duplicate_native_ids_collapse_to_last() {
        let table = table(
            &["id", "address", "lat"],
            &[&["S1", "12 Elm St", ""], &["S1", "12 Elm St", "42.1"]],
        );
        let (records, report) = normalize(&table).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].latitude, Some(42.1));
        assert_eq!(report.rows_deduplicated, 1);
    }

    #[test]
    fn empty_address_rejected() {
        let table = table(&["id", "address"], &[&["S1", ""]]);
        let (records, report) = normalize(&table).unwrap();
        assert!(records.is_empty());
        assert_eq!(report.rows_rejected, 1);
    }
}
