//! 311 service-request normalization.

use ward_core::entities::ServiceRequest311;
use ward_core::enums::Severity;
use ward_core::quality::{QualityReport, RejectReason};

use crate::columns::choose_column;
use crate::dates::parse_date;
use crate::error::NormalizeError;
use crate::table::RawTable;

use super::{DATE_CANDIDATES, DISTRICT_CANDIDATES, dedup_last};

const ADDRESS_CANDIDATES: &[&str] = &["address", "location", "street_address", "full_address"];

const CATEGORY_CANDIDATES: &[&str] = &["case_title", "subject", "reason", "type", "category"];

const CASE_ID_CANDIDATES: &[&str] = &["case_enquiry_id", "case_id", "sr_number", "id"];

/// Normalize raw 311 rows. Same shape and rejection rules as violations;
/// severity is classified from the request category text.
///
/// # Errors
///
/// `MissingColumns` when no address or date column exists under any alias.
pub fn normalize(
    table: &RawTable,
) -> Result<(Vec<ServiceRequest311>, QualityReport), NormalizeError> {
    let mut report = QualityReport::new("normalize/service_311");
    if table.is_empty() {
        return Ok((Vec::new(), report));
    }
    report.rows_seen = table.rows.len();

    let address_col = choose_column(&table.headers, ADDRESS_CANDIDATES);
    let date_col = choose_column(&table.headers, DATE_CANDIDATES);
    let mut missing = Vec::new();
    if address_col.is_none() {
        missing.push("address");
    }
    if date_col.is_none() {
        missing.push("date");
    }
    if !missing.is_empty() {
        return Err(NormalizeError::MissingColumns {
            path: table.path.clone(),
            columns: missing.join(", "),
        });
    }

    let category_col = choose_column(&table.headers, CATEGORY_CANDIDATES);
    let district_col = choose_column(&table.headers, DISTRICT_CANDIDATES);
    let case_col = choose_column(&table.headers, CASE_ID_CANDIDATES);

    let mut keyed = Vec::with_capacity(table.rows.len());
    for (position, row) in table.rows.iter().enumerate() {
        let row_number = position + 1;

        let address = table.cell(row, address_col).trim();
        if address.is_empty() {
            report.reject(row_number, RejectReason::EmptyRequiredField("address".into()));
            continue;
        }

        let raw_date = table.cell(row, date_col);
        let Some(date) = parse_date(raw_date) else {
            report.reject(row_number, RejectReason::UnparseableDate(raw_date.into()));
            continue;
        };

        let category = table.cell(row, category_col).trim().to_string();
        let severity = Severity::classify(&category);
        let district = {
            let value = table.cell(row, district_col).trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        let case_id = table.cell(row, case_col).trim();
        let natural_key = if case_id.is_empty() {
            format!("{address}|{date}|{category}")
        } else {
            case_id.to_string()
        };

        keyed.push((
            natural_key,
            ServiceRequest311 {
                property_key: None,
                address: address.to_string(),
                district,
                date,
                severity,
                category,
            },
        ));
    }

    let (requests, collapsed) = dedup_last(keyed);
    report.rows_deduplicated = collapsed;
    report.rows_emitted = requests.len();
    debug_assert!(report.is_conserved());

    Ok((requests, report))
}
