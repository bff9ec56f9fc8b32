//! Input and output file locations.
//!
//! Every stage reads its complete input from these paths and writes its
//! output before the next stage starts; the CLI can override any of them
//! per invocation.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_raw_dir() -> String {
    "data/raw".into()
}

fn default_processed_dir() -> String {
    "data/processed".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    /// Directory holding raw source snapshots.
    #[serde(default = "default_raw_dir")]
    pub raw_dir: String,

    /// Directory for pipeline outputs.
    #[serde(default = "default_processed_dir")]
    pub processed_dir: String,
}

impl PathsConfig {
    // --- raw inputs ---

    #[must_use]
    pub fn violations(&self) -> PathBuf {
        self.raw("violations.csv")
    }

    #[must_use]
    pub fn service_311(&self) -> PathBuf {
        self.raw("service_requests_311.csv")
    }

    #[must_use]
    pub fn sam_addresses(&self) -> PathBuf {
        self.raw("sam_addresses.csv")
    }

    #[must_use]
    pub fn assessments(&self) -> PathBuf {
        self.raw("property_assessment.csv")
    }

    #[must_use]
    pub fn student_housing(&self) -> PathBuf {
        self.raw("student_housing.csv")
    }

    #[must_use]
    pub fn district_boundaries(&self) -> PathBuf {
        self.raw("city_council_districts.geojson")
    }

    // --- pipeline outputs ---

    #[must_use]
    pub fn student_housing_clean(&self) -> PathBuf {
        self.processed("student_housing_clean.csv")
    }

    #[must_use]
    pub fn property_registry(&self) -> PathBuf {
        self.processed("property_registry.csv")
    }

    #[must_use]
    pub fn property_risk(&self) -> PathBuf {
        self.processed("property_risk.csv")
    }

    #[must_use]
    pub fn landlord_risk(&self) -> PathBuf {
        self.processed("landlord_risk.csv")
    }

    #[must_use]
    pub fn district_risk(&self) -> PathBuf {
        self.processed("district_risk.csv")
    }

    #[must_use]
    pub fn yearly_trend(&self) -> PathBuf {
        self.processed("district_yearly_trend.csv")
    }

    fn raw(&self, name: &str) -> PathBuf {
        PathBuf::from(&self.raw_dir).join(name)
    }

    fn processed(&self, name: &str) -> PathBuf {
        PathBuf::from(&self.processed_dir).join(name)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            raw_dir: default_raw_dir(),
            processed_dir: default_processed_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn paths_join_under_configured_dirs() {
        let paths = PathsConfig {
            raw_dir: "/tmp/in".into(),
            processed_dir: "/tmp/out".into(),
        };
        assert_eq!(paths.violations(), PathBuf::from("/tmp/in/violations.csv"));
        assert_eq!(
            paths.property_registry(),
            PathBuf::from("/tmp/out/property_registry.csv")
        );
    }
}
