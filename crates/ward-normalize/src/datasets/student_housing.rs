//! Student-housing survey normalization.

use ward_core::entities::StudentHousingRecord;
use ward_core::quality::{QualityReport, RejectReason};

use crate::columns::choose_column;
use crate::error::NormalizeError;
use crate::table::RawTable;
use crate::values::{parse_coordinate, parse_count, parse_year};

use super::dedup_last;

const ADDRESS_CANDIDATES: &[&str] = &["address", "street_address", "property_address"];
const DISTRICT_CANDIDATES: &[&str] = &["district", "city_council_district", "council_district"];
const YEAR_CANDIDATES: &[&str] = &["year", "report_year", "academic_year"];
const STUDENT_CANDIDATES: &[&str] = &["student_count", "students", "num_students", "students_total"];
const UNIT_CANDIDATES: &[&str] = &["units", "unit_count", "num_units", "housing_units"];
const LANDLORD_CANDIDATES: &[&str] = &["landlord", "owner", "owner_name", "property_owner"];
const LATITUDE_CANDIDATES: &[&str] = &["latitude", "lat", "y", "y_coord"];
const LONGITUDE_CANDIDATES: &[&str] = &["longitude", "lon", "lng", "long", "x", "x_coord"];

/// Normalize student-housing survey rows.
///
/// The survey drives both the registry and the trend stage, so the address,
/// district, year, and student-count columns must all exist; individual
/// cells may still be empty and normalize to `None`.
///
/// # Errors
///
/// `MissingColumns` listing every required column absent under all aliases.
pub fn normalize(
    table: &RawTable,
) -> Result<(Vec<StudentHousingRecord>, QualityReport), NormalizeError> {
    let mut report = QualityReport::new("normalize/student_housing");
    if table.is_empty() {
        return Ok((Vec::new(), report));
    }
    report.rows_seen = table.rows.len();

    let address_col = choose_column(&table.headers, ADDRESS_CANDIDATES);
    let district_col = choose_column(&table.headers, DISTRICT_CANDIDATES);
    let year_col = choose_column(&table.headers, YEAR_CANDIDATES);
    let student_col = choose_column(&table.headers, STUDENT_CANDIDATES);

    let mut missing = Vec::new();
    if address_col.is_none() {
        missing.push("address");
    }
    if district_col.is_none() {
        missing.push("district");
    }
    if year_col.is_none() {
        missing.push("year");
    }
    if student_col.is_none() {
        missing.push("student_count");
    }
    if !missing.is_empty() {
        return Err(NormalizeError::MissingColumns {
            path: table.path.clone(),
            columns: missing.join(", "),
        });
    }

    let unit_col = choose_column(&table.headers, UNIT_CANDIDATES);
    let landlord_col = choose_column(&table.headers, LANDLORD_CANDIDATES);
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

        let year = parse_year(table.cell(row, year_col));
        let district = {
            let value = table.cell(row, district_col).trim();
            (!value.is_empty()).then(|| value.to_string())
        };
        let landlord = {
            let value = table.cell(row, landlord_col).trim();
            (!value.is_empty()).then(|| value.to_string())
        };

        let natural_key = format!("{address}|{}", year.map_or_else(String::new, |y| y.to_string()));

        keyed.push((
            natural_key,
            StudentHousingRecord {
                address: address.to_string(),
                district,
                year,
                student_count: parse_count(table.cell(row, student_col)),
                units: parse_count(table.cell(row, unit_col)),
                landlord,
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
