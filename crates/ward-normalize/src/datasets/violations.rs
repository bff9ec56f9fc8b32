//! Building/property violation normalization.

use ward_core::entities::ViolationEvent;
use ward_core::enums::{Severity, ViolationStatus};
use ward_core::quality::{QualityReport, RejectReason};

use crate::columns::choose_column;
use crate::dates::parse_date;
use crate::error::NormalizeError;
use crate::table::RawTable;

use super::{DATE_CANDIDATES, DISTRICT_CANDIDATES, dedup_last};

const ADDRESS_CANDIDATES: &[&str] = &[
    "address",
    "location",
    "street_address",
    "full_address",
    "violation_address",
    "violation_st",
];

const SEVERITY_CANDIDATES: &[&str] = &[
    "severity",
    "code_severity",
    "violation_level",
    "violationtype_descr",
    "violation_type",
    "description",
];

const CASE_ID_CANDIDATES: &[&str] = &["case_no", "case_number", "ticket_no", "id"];

/// Normalize raw violation rows into dated, severity-classified events.
///
/// Rows with an empty address or an unparseable date are rejected
/// per-record; duplicate cases collapse to the last-seen snapshot row.
///
/// # Errors
///
/// `MissingColumns` when no address or date column exists under any alias.
pub fn normalize(table: &RawTable) -> Result<(Vec<ViolationEvent>, QualityReport), NormalizeError> {
    let mut report = QualityReport::new("normalize/violations");
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

    let severity_col = choose_column(&table.headers, SEVERITY_CANDIDATES);
    let district_col = choose_column(&table.headers, DISTRICT_CANDIDATES);
    let status_col = choose_column(&table.headers, &["status"]);
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

        let severity = Severity::classify(table.cell(row, severity_col));
        let status = ViolationStatus::parse(table.cell(row, status_col));
        let district = non_empty(table.cell(row, district_col));

        let case_id = table.cell(row, case_col).trim();
        let natural_key = if case_id.is_empty() {
            format!("{address}|{date}|{severity}|{status}")
        } else {
            case_id.to_string()
        };

        keyed.push((
            natural_key,
            ViolationEvent {
                property_key: None,
                address: address.to_string(),
                district,
                date,
                severity,
                status,
            },
        ));
    }

    let (events, collapsed) = dedup_last(keyed);
    report.rows_deduplicated = collapsed;
    report.rows_emitted = events.len();
    debug_assert!(report.is_conserved());

    Ok((events, report))
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            path: "violations.csv".into(),
            headers: headers.iter().map(|s| (*s).into()).collect(),
            rows: rows
                .iter()
                .map(|row| row.iter().map(|s| (*s).into()).collect())
                .collect(),
        }
    }

    #[test]
    fn normalizes_typed_events() {
        let table = table(
            &["case_no", "violation_st", "violdttm", "description", "status"],
            &[&["C1", "12 Elm St", "2021-03-04 09:00:00", "Unsafe egress", "Open"]],
        );
        let (events, report) = normalize(&table).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date, NaiveDate::from_ymd_opt(2021, 3, 4).unwrap());
        assert_eq!(events[0].severity, Severity::Critical);
        assert!(events[0].status.is_open());
        assert!(report.is_conserved());
    }

    #[test]
    fn rejects_bad_dates_and_empty_addresses() {
        let table = table(
            &["address", "date"],
            &[
                &["12 Elm St", "2021-01-01"],
                &["", "2021-01-01"],
                &["14 Oak St", "never"],
            ],
        );
        let (events, report) = normalize(&table).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(report.rows_rejected, 2);
        assert!(report.is_conserved());
        assert_eq!(report.rejections[0].reason.label(), "empty_required_field");
        assert_eq!(report.rejections[1].reason.label(), "unparseable_date");
    }

    #[test]
    fn duplicate_cases_keep_last_snapshot() {
        let table = table(
            &["case_no", "address", "date", "status"],
            &[
                &["C1", "12 Elm St", "2021-01-01", "Open"],
                &["C1", "12 Elm St", "2021-01-01", "Closed"],
            ],
        );
        let (events, report) = normalize(&table).unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].status, ViolationStatus::Closed);
        assert_eq!(report.rows_deduplicated, 1);
        assert!(report.is_conserved());
    }

    #[test]
    fn missing_date_column_is_fatal() {
        let table = table(&["address", "status"], &[&["12 Elm St", "Open"]]);
        let err = normalize(&table).unwrap_err();
        assert!(matches!(err, NormalizeError::MissingColumns { .. }));
    }

    #[test]
    fn conservation_law_holds() {
        let table = table(
            &["address", "date"],
            &[
                &["1 A St", "2021-01-01"],
                &["2 B St", "bad"],
                &["3 C St", "2021-01-03"],
            ],
        );
        let (events, report) = normalize(&table).unwrap();
        assert_eq!(events.len() + report.rows_rejected, report.rows_seen);
    }
}
