//! Per-stage data-quality accounting.
//!
//! Every pipeline stage returns its output together with a [`QualityReport`]
//! rather than writing to shared counters. Per-record issues are isolated to
//! the record; the report is how they surface without aborting the stage.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// RejectReason
// ---------------------------------------------------------------------------

/// Why a single record was rejected or excluded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum RejectReason {
    /// A date column value could not be parsed by any accepted format.
    UnparseableDate(String),
    /// A required field was empty after trimming.
    EmptyRequiredField(String),
    /// An event's address failed to resolve to any registry property.
    UnlinkedAddress(String),
}

impl RejectReason {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::UnparseableDate(_) => "unparseable_date",
            Self::EmptyRequiredField(_) => "empty_required_field",
            Self::UnlinkedAddress(_) => "unlinked_address",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnparseableDate(raw) => write!(f, "unparseable date: {raw:?}"),
            Self::EmptyRequiredField(field) => write!(f, "empty required field: {field}"),
            Self::UnlinkedAddress(address) => write!(f, "unlinked address: {address:?}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

/// A single rejected record: 1-based data-row position plus reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub row: usize,
    pub reason: RejectReason,
}

// ---------------------------------------------------------------------------
// QualityReport
// ---------------------------------------------------------------------------

/// Accounting for one stage over one dataset.
///
/// Conservation invariant: `rows_seen == rows_emitted + rows_rejected +
/// rows_deduplicated`, checked by [`QualityReport::is_conserved`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualityReport {
    /// Stage or dataset label, e.g. `"normalize/violations"`.
    pub stage: String,
    pub rows_seen: usize,
    pub rows_emitted: usize,
    pub rows_rejected: usize,
    pub rows_deduplicated: usize,
    /// Events excluded because no property could be resolved.
    pub rows_unlinked: usize,
    /// Spatial assignments that matched more than one polygon.
    pub ambiguous_matches: usize,
    /// Per-record rejection detail, in input order.
    pub rejections: Vec<Rejection>,
}

impl QualityReport {
    #[must_use]
    pub fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            ..Self::default()
        }
    }

    /// Record a rejection for the given 1-based data row.
    pub fn reject(&mut self, row: usize, reason: RejectReason) {
        self.rows_rejected += 1;
        self.rejections.push(Rejection { row, reason });
    }

    /// Whether every input row is accounted for.
    #[must_use]
    pub const fn is_conserved(&self) -> bool {
        self.rows_seen == self.rows_emitted + self.rows_rejected + self.rows_deduplicated
    }

    /// Whether the stage saw any per-record issue worth surfacing.
    #[must_use]
    pub const fn has_issues(&self) -> bool {
        self.rows_rejected > 0 || self.rows_unlinked > 0 || self.ambiguous_matches > 0
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: seen={} emitted={} rejected={} deduplicated={} unlinked={} ambiguous={}",
            self.stage,
            self.rows_seen,
            self.rows_emitted,
            self.rows_rejected,
            self.rows_deduplicated,
            self.rows_unlinked,
            self.ambiguous_matches,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn conservation_holds_for_clean_run() {
        let mut report = QualityReport::new("normalize/violations");
        report.rows_seen = 10;
        report.rows_emitted = 10;
        assert!(report.is_conserved());
        assert!(!report.has_issues());
    }

    #[test]
    fn reject_updates_counts_and_detail() {
        let mut report = QualityReport::new("normalize/violations");
        report.rows_seen = 3;
        report.rows_emitted = 2;
        report.reject(2, RejectReason::UnparseableDate("13/45/2020".into()));
        assert!(report.is_conserved());
        assert!(report.has_issues());
        assert_eq!(report.rejections.len(), 1);
        assert_eq!(report.rejections[0].row, 2);
        assert_eq!(report.rejections[0].reason.label(), "unparseable_date");
    }

    #[test]
    fn dedup_counts_toward_conservation() {
        let mut report = QualityReport::new("normalize/sam");
        report.rows_seen = 5;
        report.rows_emitted = 3;
        report.rows_deduplicated = 2;
        assert!(report.is_conserved());
    }

    #[test]
    fn display_is_single_line_summary() {
        let mut report = QualityReport::new("spatial");
        report.rows_seen = 4;
        report.rows_emitted = 4;
        report.ambiguous_matches = 1;
        let line = report.to_string();
        assert!(line.starts_with("spatial: seen=4"));
        assert!(line.contains("ambiguous=1"));
    }
}
