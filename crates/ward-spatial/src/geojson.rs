//! District boundary loading from GeoJSON.
//!
//! Boundaries are parsed with plain serde structs: the pipeline only needs
//! polygon rings and a district id, so a typed subset of the format beats a
//! full geometry dependency. Feature order is preserved: ambiguous matches
//! resolve to the first polygon in input order.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;
use tracing::warn;

use crate::error::SpatialError;

/// A position is `[lon, lat]`, possibly with extra members (altitude) that
/// are carried but ignored.
type Position = Vec<f64>;
/// A closed ring of positions.
pub type Ring = Vec<Position>;
/// Exterior ring followed by any interior hole rings.
pub type PolygonRings = Vec<Ring>;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
    geometry: Option<RawGeometry>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawGeometry {
    Polygon { coordinates: PolygonRings },
    MultiPolygon { coordinates: Vec<PolygonRings> },
    #[serde(other)]
    Unsupported,
}

/// One district's boundary: id plus one or more polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictPolygon {
    pub district_id: String,
    pub polygons: Vec<PolygonRings>,
}

impl DistrictPolygon {
    /// Whether the point falls inside any of this district's polygons.
    #[must_use]
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.polygons
            .iter()
            .any(|rings| crate::pip::point_in_polygon(lon, lat, rings))
    }
}

/// Load district polygons, preserving feature order.
///
/// A missing boundary file is not fatal: the aggregator falls back to the
/// declared-district attribute for every property, exactly as it does
/// per-property when a point matches no polygon.
///
/// # Errors
///
/// `SpatialError::InvalidBoundaries` when the file exists but cannot be
/// parsed; `SpatialError::Io` on read failures.
pub fn load_districts(path: &Path) -> Result<Vec<DistrictPolygon>, SpatialError> {
    if !path.exists() {
        warn!(path = %path.display(), "district boundary file missing; using attribute fallback only");
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)?;
    let collection: FeatureCollection =
        serde_json::from_str(&raw).map_err(|source| SpatialError::InvalidBoundaries {
            path: path.display().to_string(),
            source,
        })?;

    let mut districts = Vec::with_capacity(collection.features.len());
    for feature in collection.features {
        let district_id = district_id(&feature.properties);
        let polygons = match feature.geometry {
            Some(RawGeometry::Polygon { coordinates }) => vec![coordinates],
            Some(RawGeometry::MultiPolygon { coordinates }) => coordinates,
            Some(RawGeometry::Unsupported) | None => {
                warn!(district = %district_id, "feature without polygon geometry skipped");
                continue;
            }
        };
        districts.push(DistrictPolygon {
            district_id,
            polygons,
        });
    }
    Ok(districts)
}

/// District id from feature properties, trying the keys municipal exports
/// actually use.
fn district_id(properties: &serde_json::Map<String, Value>) -> String {
    for key in ["district", "name", "DISTRICT"] {
        match properties.get(key) {
            Some(Value::String(value)) if !value.trim().is_empty() => {
                return value.trim().to_string();
            }
            Some(Value::Number(value)) => return value.to_string(),
            _ => {}
        }
    }
    "UNKNOWN".to_string()
}
