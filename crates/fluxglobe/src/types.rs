//! Records loaded from the globe's data assets.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use fluxglobe_geom::{GeoCoordinate, GeomResult};

/// A destination for a flux, read from `capitals.json`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Capital {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Country the capital belongs to.
    pub country: String,
    /// Name of the capital city, when known.
    #[serde(default)]
    pub capital: Option<String>,
}

impl Capital {
    /// Validated coordinate of this capital.
    pub fn coordinate(&self) -> GeomResult<GeoCoordinate> {
        GeoCoordinate::new(self.latitude, self.longitude)
    }
}

/// One entry of `indexed_countries.json`.
///
/// Entry `k` of the table is the country painted with red value `k + 1` in
/// the index raster.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IndexedCountry {
    pub name: String,
    /// ISO 3166-1 alpha-2 code.
    #[serde(default, alias = "iso2", alias = "iso_a2")]
    pub code: Option<String>,
    /// ISO 3166-1 alpha-3 code.
    #[serde(default, alias = "iso3", alias = "iso_a3")]
    pub code3: Option<String>,
    /// Any other fields, kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// File names of the assets, relative to the asset base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    pub capitals: String,
    pub indexed_countries: String,
    pub borders: String,
    pub index_raster: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            capitals: "capitals.json".to_string(),
            indexed_countries: "indexed_countries.json".to_string(),
            borders: "countries.geo.json".to_string(),
            index_raster: "index.png".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capital_without_city_name() {
        let capitals: Vec<Capital> = serde_json::from_str(
            r#"[
                {"latitude": 48.8566, "longitude": 2.3522, "country": "France", "capital": "Paris"},
                {"latitude": -0.2, "longitude": -78.5, "country": "Ecuador"}
            ]"#,
        )
        .unwrap();
        assert_eq!(capitals[0].capital.as_deref(), Some("Paris"));
        assert_eq!(capitals[1].capital, None);
        assert!(capitals[1].coordinate().is_ok());
    }

    #[test]
    fn test_capital_out_of_range() {
        let capital = Capital {
            latitude: 91.0,
            longitude: 0.0,
            country: "Nowhere".to_string(),
            capital: None,
        };
        assert!(capital.coordinate().is_err());
    }

    #[test]
    fn test_indexed_country_aliases_and_extra_fields() {
        let country: IndexedCountry = serde_json::from_str(
            r#"{"name": "Japan", "iso_a2": "JP", "iso3": "JPN", "population": 125}"#,
        )
        .unwrap();
        assert_eq!(country.code.as_deref(), Some("JP"));
        assert_eq!(country.code3.as_deref(), Some("JPN"));
        assert_eq!(country.extra.get("population"), Some(&Value::from(125)));
    }
}
