//! Online reverse geocoding through OpenStreetMap Nominatim.
//!
//! Used as a fallback when a pick lands on index 0 or the country table is
//! unavailable. Requests ask for country-level detail only.

use serde::Deserialize;

use fluxglobe_geom::GeoCoordinate;

use crate::error::{Error, Result};

/// User agent for API requests (required by the Nominatim usage policy).
const USER_AGENT: &str = concat!("fluxglobe/", env!("CARGO_PKG_VERSION"));

/// Nominatim reverse geocoding endpoint.
pub const NOMINATIM_REVERSE_URL: &str = "https://nominatim.openstreetmap.org/reverse";

/// Zoom level asking Nominatim for country-scale results.
const COUNTRY_ZOOM: u8 = 6;

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<Address>,
}

#[derive(Debug, Deserialize)]
struct Address {
    #[serde(default)]
    country: Option<String>,
    #[serde(default)]
    country_code: Option<String>,
}

impl ReverseResponse {
    /// Country name, falling back to the country code.
    fn into_country(self) -> Option<String> {
        let address = self.address?;
        address.country.or(address.country_code)
    }
}

/// Client for Nominatim reverse lookups.
#[derive(Debug, Clone)]
pub struct ReverseGeocoder {
    http: reqwest::Client,
    endpoint: String,
}

impl ReverseGeocoder {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Http {
                url: NOMINATIM_REVERSE_URL.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self {
            http,
            endpoint: NOMINATIM_REVERSE_URL.to_string(),
        })
    }

    /// Point at another Nominatim instance.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Country at a coordinate, or `None` when Nominatim reports none (open
    /// sea, for example).
    pub async fn country_at(&self, coordinate: GeoCoordinate) -> Result<Option<String>> {
        tracing::debug!(
            lat = coordinate.latitude(),
            lon = coordinate.longitude(),
            "reverse geocoding"
        );

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("format", "json".to_string()),
                ("addressdetails", "1".to_string()),
                ("zoom", COUNTRY_ZOOM.to_string()),
                ("lat", coordinate.latitude().to_string()),
                ("lon", coordinate.longitude().to_string()),
            ])
            .send()
            .await
            .map_err(|e| Error::Http {
                url: self.endpoint.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }

        let body: ReverseResponse = response.json().await.map_err(|e| Error::Json {
            context: "reverse geocoding response",
            message: e.to_string(),
        })?;
        Ok(body.into_country())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Option<String> {
        serde_json::from_str::<ReverseResponse>(json)
            .unwrap()
            .into_country()
    }

    #[test]
    fn test_country_name_preferred() {
        assert_eq!(
            parse(r#"{"address": {"country": "France", "country_code": "fr"}}"#),
            Some("France".to_string())
        );
    }

    #[test]
    fn test_falls_back_to_country_code() {
        assert_eq!(
            parse(r#"{"address": {"country_code": "jp"}}"#),
            Some("jp".to_string())
        );
    }

    #[test]
    fn test_no_address() {
        assert_eq!(parse(r#"{"error": "Unable to geocode"}"#), None);
        assert_eq!(parse(r#"{"address": {"state": "Somewhere"}}"#), None);
    }

    #[test]
    fn test_user_agent_names_the_crate() {
        assert!(USER_AGENT.starts_with("fluxglobe/"));
        assert!(ReverseGeocoder::new().is_ok());
    }
}
