//! Minimal GeoJSON model for country borders.
//!
//! Only `Polygon` and `MultiPolygon` geometries are turned into rings; other
//! geometry types parse but yield no rings.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::coords::GeoCoordinate;
use crate::error::{GeomError, GeomResult};

/// An implicitly closed ring of coordinates.
pub type Ring = Vec<GeoCoordinate>;

/// A `FeatureCollection` document.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Parse a GeoJSON document.
    pub fn from_slice(data: &[u8]) -> GeomResult<Self> {
        serde_json::from_slice(data).map_err(|e| GeomError::InvalidFormat {
            context: "geojson",
            detail: e.to_string(),
        })
    }
}

/// A single feature with free-form properties.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    pub geometry: Option<Geometry>,
}

impl Feature {
    /// The `name` property, if present and a string.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.properties.as_ref()?.get("name")?.as_str()
    }

    /// The polygon rings of this feature.
    ///
    /// Returns `Ok(None)` for features without geometry or with a geometry
    /// type other than `Polygon`/`MultiPolygon`.
    pub fn polygons(&self) -> GeomResult<Option<PolygonGeometry>> {
        match &self.geometry {
            Some(geometry) => geometry.polygons(),
            None => Ok(None),
        }
    }
}

/// A raw geometry object: its type tag and untyped coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

/// Polygon rings of a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonGeometry {
    /// Outer ring followed by holes.
    Polygon(Vec<Ring>),
    /// Several polygons, each an outer ring followed by holes.
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Interpret the coordinates as polygon rings.
    pub fn polygons(&self) -> GeomResult<Option<PolygonGeometry>> {
        match self.kind.as_str() {
            "Polygon" => {
                let raw: Vec<Vec<Vec<f64>>> = parse_coordinates(&self.coordinates)?;
                Ok(Some(PolygonGeometry::Polygon(convert_polygon(&raw)?)))
            }
            "MultiPolygon" => {
                let raw: Vec<Vec<Vec<Vec<f64>>>> = parse_coordinates(&self.coordinates)?;
                let polygons = raw
                    .iter()
                    .map(|polygon| convert_polygon(polygon))
                    .collect::<GeomResult<_>>()?;
                Ok(Some(PolygonGeometry::MultiPolygon(polygons)))
            }
            _ => Ok(None),
        }
    }
}

fn parse_coordinates<T: serde::de::DeserializeOwned>(value: &Value) -> GeomResult<T> {
    T::deserialize(value).map_err(|e| GeomError::InvalidFormat {
        context: "geojson coordinates",
        detail: e.to_string(),
    })
}

fn convert_polygon(rings: &[Vec<Vec<f64>>]) -> GeomResult<Vec<Ring>> {
    rings
        .iter()
        .map(|ring| ring.iter().map(|p| position(p)).collect())
        .collect()
}

/// GeoJSON positions are `[longitude, latitude, ...]`.
fn position(values: &[f64]) -> GeomResult<GeoCoordinate> {
    match values {
        [lon, lat, ..] => GeoCoordinate::new(*lat, *lon),
        _ => Err(GeomError::InvalidFormat {
            context: "geojson position",
            detail: format!("expected at least 2 values, got {}", values.len()),
        }),
    }
}
