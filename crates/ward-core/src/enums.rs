//! Severity, status, and classification enums for the pipeline.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`
//! and expose `as_str()` for stable output columns.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Ordinal violation severity, codes 1 (lowest) through 5 (highest).
///
/// Source datasets rarely carry a clean numeric code; free-text severity or
/// description columns are classified by keyword via [`Severity::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Moderate,
    High,
    Severe,
    Critical,
}

/// Keywords that map free-text severity descriptions onto ordinal classes.
/// Checked in descending severity order so the strongest signal wins.
const SEVERITY_KEYWORDS: &[(&str, Severity)] = &[
    ("critical", Severity::Critical),
    ("unsafe", Severity::Critical),
    ("fire", Severity::Critical),
    ("emergency", Severity::Critical),
    ("hazard", Severity::Severe),
    ("severe", Severity::Severe),
    ("high", Severity::High),
    ("major", Severity::High),
    ("medium", Severity::Moderate),
    ("moderate", Severity::Moderate),
    ("low", Severity::Low),
    ("minor", Severity::Low),
];

impl Severity {
    /// Ordinal code, 1..=5.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Low => 1,
            Self::Moderate => 2,
            Self::High => 3,
            Self::Severe => 4,
            Self::Critical => 5,
        }
    }

    /// Inverse of [`Severity::code`].
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Low),
            2 => Some(Self::Moderate),
            3 => Some(Self::High),
            4 => Some(Self::Severe),
            5 => Some(Self::Critical),
            _ => None,
        }
    }

    /// Classify a raw severity column value.
    ///
    /// A bare numeric code 1-5 is taken literally; otherwise the text is
    /// scanned for severity keywords. Unrecognized text falls back to
    /// `Moderate`, matching how unclassifiable violations are treated in the
    /// source data.
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let text = raw.trim().to_lowercase();
        if let Ok(code) = text.parse::<u8>() {
            if let Some(severity) = Self::from_code(code) {
                return severity;
            }
        }
        for (keyword, severity) in SEVERITY_KEYWORDS {
            if text.contains(keyword) {
                return *severity;
            }
        }
        Self::Moderate
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Severe => "severe",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ViolationStatus
// ---------------------------------------------------------------------------

/// Case status of a violation record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationStatus {
    Open,
    Active,
    Pending,
    Closed,
    Unknown,
}

impl ViolationStatus {
    /// Parse a raw status column value. Anything unrecognized is `Unknown`
    /// rather than a rejection; status is informational, not required.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "open" => Self::Open,
            "active" => Self::Active,
            "pending" => Self::Pending,
            "closed" | "resolved" => Self::Closed,
            _ => Self::Unknown,
        }
    }

    /// Whether the case is still open for enforcement purposes.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open | Self::Active | Self::Pending)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Closed => "closed",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ViolationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SourceDataset
// ---------------------------------------------------------------------------

/// Input dataset a record originated from.
///
/// The string form doubles as the namespace prefix for synthesized fallback
/// keys, so two datasets can never produce the same key even when their
/// native ids collide as strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceDataset {
    StudentHousing,
    Sam,
    Assessment,
    Violations,
    #[serde(rename = "service_311")]
    Service311,
}

impl SourceDataset {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StudentHousing => "student_housing",
            Self::Sam => "sam",
            Self::Assessment => "assessment",
            Self::Violations => "violations",
            Self::Service311 => "service_311",
        }
    }

    /// Inverse of [`SourceDataset::as_str`], for reading keys back from
    /// output tables.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "student_housing" => Some(Self::StudentHousing),
            "sam" => Some(Self::Sam),
            "assessment" => Some(Self::Assessment),
            "violations" => Some(Self::Violations),
            "service_311" => Some(Self::Service311),
            _ => None,
        }
    }
}

impl fmt::Display for SourceDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// MatchMethod
// ---------------------------------------------------------------------------

/// How a record was resolved to a canonical property key.
///
/// Methods are tried in declaration order; the resolution order is part of
/// the registry contract and is auditable in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMethod {
    ExactAddress,
    ExactComposite,
    FuzzyJaccard,
    Synthesized,
}

impl MatchMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ExactAddress => "exact_address",
            Self::ExactComposite => "exact_composite",
            Self::FuzzyJaccard => "fuzzy_jaccard",
            Self::Synthesized => "synthesized",
        }
    }
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EventKind
// ---------------------------------------------------------------------------

/// Kind of enforcement signal an event represents. Violations are confirmed
/// findings; 311 requests are unverified complaints and score at a lower
/// multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Violation,
    ServiceRequest,
}

impl EventKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Violation => "violation",
            Self::ServiceRequest => "service_request",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
