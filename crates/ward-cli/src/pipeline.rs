//! Stage orchestration.
//!
//! Each stage reads its complete input from disk, computes in memory, and
//! writes its output before the next stage starts; each stage's output file
//! is the next stage's sole input. Every stage hands back the quality
//! reports it produced so the caller can surface them without any shared
//! counters.

use std::collections::HashSet;

use anyhow::Context;
use chrono::NaiveDate;
use tracing::info;
use ward_config::WardConfig;
use ward_core::enums::SourceDataset;
use ward_core::quality::QualityReport;
use ward_normalize::{RawTable, datasets};
use ward_registry::{AddressIndex, Matcher, RegistryBuilder};
use ward_risk::{
    RiskParams, aggregate_landlords, link_service_requests, link_violations, score_properties,
};
use ward_spatial::{RiskPoint, aggregate_districts, load_districts};
use ward_trend::aggregate_trend;

use crate::tables::{self, PropertyRiskRow};

/// Normalize the raw student-housing survey into the clean table.
pub fn run_normalize(config: &WardConfig) -> anyhow::Result<Vec<QualityReport>> {
    let table = RawTable::read(&config.paths.student_housing())?;
    let (records, report) = datasets::student_housing::normalize(&table)?;
    tables::write_student_clean(&config.paths.student_housing_clean(), &records)?;
    info!(rows = records.len(), "wrote clean student-housing table");
    Ok(vec![report])
}

/// Build the canonical property registry from every address source.
pub fn run_registry(config: &WardConfig) -> anyhow::Result<Vec<QualityReport>> {
    let student_table = RawTable::read(&config.paths.student_housing_clean())
        .context("clean student-housing table missing; run `wrd normalize` first")?;
    let (students, student_report) = datasets::student_housing::normalize(&student_table)?;

    let sam_table = RawTable::read_or_empty(&config.paths.sam_addresses())?;
    let (sam_records, sam_report) = datasets::sam::normalize(&sam_table)?;

    let assessment_table = RawTable::read_or_empty(&config.paths.assessments())?;
    let (assessments, assessment_report) = datasets::assessment::normalize(&assessment_table)?;

    // Source priority order: the survey seeds the registry, SAM contributes
    // coordinates, assessments contribute landlord identity.
    let mut builder = RegistryBuilder::new();
    for (position, record) in students.iter().enumerate() {
        let native_id = format!("row-{}", position + 1);
        builder.insert(
            SourceDataset::StudentHousing,
            &native_id,
            &record.address,
            record.district.as_deref(),
            record.latitude,
            record.longitude,
            record.landlord.as_deref(),
        );
    }
    for record in &sam_records {
        builder.insert(
            SourceDataset::Sam,
            &record.native_id,
            &record.address,
            record.district.as_deref(),
            record.latitude,
            record.longitude,
            None,
        );
    }
    for record in &assessments {
        builder.insert(
            SourceDataset::Assessment,
            &record.native_id,
            &record.address,
            record.district.as_deref(),
            None,
            None,
            record.landlord.as_deref(),
        );
    }

    let (records, registry_report) = builder.build()?;
    tables::write_registry(&config.paths.property_registry(), &records)?;
    info!(properties = records.len(), "wrote property registry");

    Ok(vec![
        student_report,
        sam_report,
        assessment_report,
        registry_report,
    ])
}

/// Score properties and landlords from violations and 311 events.
pub fn run_risk(config: &WardConfig, as_of: NaiveDate) -> anyhow::Result<Vec<QualityReport>> {
    let registry = tables::read_registry(&config.paths.property_registry())
        .context("property registry missing; run `wrd registry` first")?;

    let violations_table = RawTable::read_or_empty(&config.paths.violations())?;
    let (violations, violations_report) = datasets::violations::normalize(&violations_table)?;

    let requests_table = RawTable::read_or_empty(&config.paths.service_311())?;
    let (requests, requests_report) = datasets::service311::normalize(&requests_table)?;

    let params = RiskParams::new(
        &config.risk.severity_weights,
        config.risk.half_life_days,
        config.risk.service_multiplier,
        config.risk.landlord_flag_threshold,
    )?;

    let index = AddressIndex::from_records(&registry);
    let matcher = Matcher::new(
        &index,
        config.matching.fuzzy_threshold,
        config.matching.fuzzy_enabled,
    );

    let (mut events, link_violations_report) = link_violations(&violations, &matcher);
    let (linked_requests, link_requests_report) = link_service_requests(&requests, &matcher);
    events.extend(linked_requests);

    let scores = score_properties(&registry, &events, &params, as_of)?;
    let landlords = aggregate_landlords(&registry, &scores, &params);

    let flagged: HashSet<&str> = landlords
        .iter()
        .filter(|landlord| landlord.flagged)
        .map(|landlord| landlord.landlord.as_str())
        .collect();

    // score_properties returns one score per registry record, in order.
    let mut rows: Vec<PropertyRiskRow> = registry
        .iter()
        .zip(&scores)
        .map(|(record, score)| {
            PropertyRiskRow {
                property_key: record.property_key.clone(),
                address: record.address.clone(),
                district: record.district.clone(),
                landlord: record.landlord.clone(),
                latitude: record.latitude,
                longitude: record.longitude,
                violation_events: score.violation_events,
                service_events: score.service_events,
                violation_score: score.violation_score,
                service_score: score.service_score,
                risk_score: score.score,
                flagged_landlord: record
                    .landlord
                    .as_deref()
                    .is_some_and(|landlord| flagged.contains(landlord)),
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.risk_score
            .partial_cmp(&a.risk_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.property_key.cmp(&b.property_key))
    });

    tables::write_property_risk(&config.paths.property_risk(), &rows)?;
    tables::write_landlord_risk(&config.paths.landlord_risk(), &landlords)?;
    info!(
        properties = rows.len(),
        landlords = landlords.len(),
        "wrote risk tables"
    );

    Ok(vec![
        violations_report,
        requests_report,
        link_violations_report,
        link_requests_report,
    ])
}

/// Aggregate property risk into district summaries.
pub fn run_spatial(config: &WardConfig) -> anyhow::Result<Vec<QualityReport>> {
    let rows = tables::read_property_risk(&config.paths.property_risk())
        .context("property risk table missing; run `wrd risk` first")?;
    let districts = load_districts(&config.paths.district_boundaries())?;

    let points: Vec<RiskPoint> = rows.iter().map(PropertyRiskRow::to_risk_point).collect();
    let (summaries, outcome, report) = aggregate_districts(&points, &districts);

    tables::write_district_risk(&config.paths.district_risk(), &summaries)?;
    info!(
        districts = summaries.len(),
        polygon = outcome.polygon_assigned,
        attribute = outcome.attribute_assigned,
        unmatched = outcome.unmatched_count,
        "wrote district risk summary"
    );
    Ok(vec![report])
}

/// Compute the yearly district student-housing trend.
pub fn run_trend(config: &WardConfig) -> anyhow::Result<Vec<QualityReport>> {
    let table = RawTable::read(&config.paths.student_housing_clean())
        .context("clean student-housing table missing; run `wrd normalize` first")?;
    let (records, report) = datasets::student_housing::normalize(&table)?;
    let rows = aggregate_trend(&records)?;
    tables::write_trend(&config.paths.yearly_trend(), &rows)?;
    info!(cells = rows.len(), "wrote yearly trend table");
    Ok(vec![report])
}

/// Run every stage in order. The trend stage runs last, off the same clean
/// survey table the registry consumed.
pub fn run_all(config: &WardConfig, as_of: NaiveDate) -> anyhow::Result<Vec<QualityReport>> {
    let mut reports = run_normalize(config)?;
    reports.extend(run_registry(config)?);
    reports.extend(run_risk(config, as_of)?);
    reports.extend(run_spatial(config)?);
    reports.extend(run_trend(config)?);
    Ok(reports)
}
