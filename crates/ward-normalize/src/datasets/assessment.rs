//! Property-assessment normalization. The assessment table is where
//! landlord identity comes from.

use ward_core::entities::AssessmentRecord;
use ward_core::quality::{QualityReport, RejectReason};

use crate::columns::choose_column;
use crate::error::NormalizeError;
use crate::table::RawTable;

use super::{DISTRICT_CANDIDATES, dedup_last};

const ID_CANDIDATES: &[&str] = &["pid", "parcel_id", "native_id", "id"];
const ADDRESS_CANDIDATES: &[&str] = &["address", "property_address", "street_address"];
const OWNER_CANDIDATES: &[&str] = &["owner_name", "owner", "landlord", "property_owner"];

/// Normalize assessment rows.
///
/// # Errors
///
/// `MissingColumns` when no address column exists under any alias.
pub fn normalize(
    table: &RawTable,
) -> Result<(Vec<AssessmentRecord>, QualityReport), NormalizeError> {
    let mut report = QualityReport::new("normalize/assessment");
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
    let owner_col = choose_column(&table.headers, OWNER_CANDIDATES);
    let district_col = choose_column(&table.headers, DISTRICT_CANDIDATES);

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

        let landlord = {
            let value = table.cell(row, owner_col).trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        let district = {
            let value = table.cell(row, district_col).trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        keyed.push((
            native_id.clone(),
            AssessmentRecord {
                native_id,
                address: address.to_string(),
                district,
                landlord,
            },
        ));
    }

    let (records, collapsed) = dedup_last(keyed);
    report.rows_deduplicated = collapsed;
    report.rows_emitted = records.len();
    debug_assert!(report.is_conserved());

    Ok((records, report))
}
