//! Data-quality checks over pipeline outputs.
//!
//! Verifies that the cleaned student-housing table and the property risk
//! table carry their required columns and that no required column is mostly
//! empty. Run after a pipeline pass; failures exit nonzero so the check can
//! gate downstream reporting.

use std::path::Path;

use anyhow::bail;
use ward_config::WardConfig;
use ward_normalize::RawTable;

/// A required column is unhealthy when more than this share of its cells is
/// empty.
const MAX_EMPTY_RATIO: f64 = 0.2;

/// Run all checks.
///
/// # Errors
///
/// Returns one error listing every issue found, or the underlying read
/// error when an output file is missing entirely.
pub fn run(config: &WardConfig) -> anyhow::Result<()> {
    let mut issues = Vec::new();
    issues.extend(check_required(
        &config.paths.student_housing_clean(),
        &["address", "district", "year", "student_count"],
    )?);
    issues.extend(check_required(
        &config.paths.property_risk(),
        &["property_key", "address", "risk_score"],
    )?);

    if issues.is_empty() {
        Ok(())
    } else {
        bail!("data quality checks failed:\n- {}", issues.join("\n- "));
    }
}

fn check_required(path: &Path, required: &[&str]) -> anyhow::Result<Vec<String>> {
    let table = RawTable::read(path)?;
    let mut issues = Vec::new();

    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|name| !table.headers.iter().any(|header| header == name))
        .collect();
    if !missing.is_empty() {
        issues.push(format!(
            "{}: missing required columns: {}",
            table.path,
            missing.join(", ")
        ));
        return Ok(issues);
    }

    for name in required {
        let index = table
            .headers
            .iter()
            .position(|header| header == name)
            .unwrap_or_default();
        let empty = table
            .rows
            .iter()
            .filter(|row| row.get(index).is_none_or(|cell| cell.trim().is_empty()))
            .count();
        #[allow(clippy::cast_precision_loss)]
        let ratio = empty as f64 / table.rows.len() as f64;
        if ratio > MAX_EMPTY_RATIO {
            issues.push(format!(
                "{}: column '{name}' empty ratio too high ({:.1}%)",
                table.path,
                ratio * 100.0
            ));
        }
    }
    Ok(issues)
}
