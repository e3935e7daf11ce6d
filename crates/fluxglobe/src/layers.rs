//! Scene layers built from the loaded assets.

use glam::DVec3;

use fluxglobe_geom::{
    FeatureCollection, FluxGeometry, FluxStyle, GeoCoordinate, GeomError, Sphere, build_flux,
    project_geometry,
};

use crate::error::Result;
use crate::types::Capital;

/// One flux from the home coordinate to a capital.
#[derive(Debug, Clone, PartialEq)]
pub struct Flux {
    pub destination: Capital,
    pub geometry: FluxGeometry,
}

/// Build one flux per capital, all starting at `home`.
///
/// Capitals with an invalid coordinate are skipped.
///
/// # Errors
///
/// Returns an error if `sample_count` is too small for `style`.
pub fn build_flux_layer(
    home: GeoCoordinate,
    capitals: &[Capital],
    sphere: &Sphere,
    style: FluxStyle,
    sample_count: usize,
) -> Result<Vec<Flux>> {
    if sample_count < style.min_samples() {
        return Err(GeomError::InvalidSampleCount {
            count: sample_count,
            minimum: style.min_samples(),
        }
        .into());
    }

    let mut fluxes = Vec::with_capacity(capitals.len());
    for capital in capitals {
        let destination = match capital.coordinate() {
            Ok(coordinate) => coordinate,
            Err(e) => {
                tracing::warn!(country = %capital.country, "skipping capital: {e}");
                continue;
            }
        };
        let geometry = build_flux(style, home, destination, sphere, sample_count)?;
        fluxes.push(Flux {
            destination: capital.clone(),
            geometry,
        });
    }

    tracing::debug!(count = fluxes.len(), ?style, "built flux layer");
    Ok(fluxes)
}

/// All country borders merged into one segment-pair buffer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BorderLayer {
    pub points: Vec<DVec3>,
    /// Number of features that contributed rings.
    pub countries: usize,
}

/// Project every polygon feature of a collection.
///
/// Features without polygon geometry are skipped, as are features whose
/// coordinates are invalid.
#[must_use]
pub fn build_border_layer(collection: &FeatureCollection, sphere: &Sphere) -> BorderLayer {
    let mut layer = BorderLayer::default();

    for (i, feature) in collection.features.iter().enumerate() {
        let name = feature.name().unwrap_or("<unnamed>");
        match feature.polygons() {
            Ok(Some(geometry)) => {
                layer.points.extend(project_geometry(&geometry, sphere));
                layer.countries += 1;
                tracing::trace!(index = i, name, "added border");
            }
            Ok(None) => {
                tracing::trace!(index = i, name, "skipping feature without polygons");
            }
            Err(e) => {
                tracing::warn!(index = i, name, "skipping feature: {e}");
            }
        }
    }

    tracing::debug!(
        countries = layer.countries,
        points = layer.points.len(),
        "built border layer"
    );
    layer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn capital(country: &str, latitude: f64, longitude: f64) -> Capital {
        Capital {
            latitude,
            longitude,
            country: country.to_string(),
            capital: None,
        }
    }

    fn home() -> GeoCoordinate {
        GeoCoordinate::new(47.21176, -1.573).unwrap()
    }

    #[test]
    fn test_flux_layer_one_per_capital() {
        let sphere = Sphere::at_origin(300.0).unwrap();
        let capitals = [
            capital("Japan", 35.6895, 139.6917),
            capital("Broken", 123.0, 0.0),
            capital("Peru", -12.0464, -77.0428),
        ];
        let fluxes =
            build_flux_layer(home(), &capitals, &sphere, FluxStyle::DoubleCubic, 50).unwrap();

        assert_eq!(fluxes.len(), 2);
        assert_eq!(fluxes[1].destination.country, "Peru");
        let FluxGeometry::Line(arc) = &fluxes[0].geometry else {
            panic!("expected a line");
        };
        assert_eq!(arc.len(), 50);
        assert_eq!(arc.points()[0], sphere.surface_point(home()));
    }

    #[test]
    fn test_flux_layer_rejects_small_sample_count() {
        let sphere = Sphere::at_origin(300.0).unwrap();
        let result = build_flux_layer(home(), &[], &sphere, FluxStyle::Ribbon, 2);
        assert!(matches!(
            result,
            Err(Error::Geom(GeomError::InvalidSampleCount { count: 2, minimum: 3 }))
        ));
    }

    #[test]
    fn test_border_layer_merges_features() {
        let collection = FeatureCollection::from_slice(
            br#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "properties": {"name": "A"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]]}},
                {"type": "Feature", "properties": {"name": "Pin"},
                 "geometry": {"type": "Point", "coordinates": [0, 0]}},
                {"type": "Feature", "properties": {"name": "Bad"},
                 "geometry": {"type": "Polygon", "coordinates": [[[0, 100], [1, 0]]]}},
                {"type": "Feature", "properties": {"name": "B"},
                 "geometry": {"type": "MultiPolygon", "coordinates": [[[[5, 5], [6, 5]]], [[[7, 7], [8, 7], [8, 8]]]]}}
            ]}"#,
        )
        .unwrap();
        let sphere = Sphere::at_origin(1.0).unwrap();
        let layer = build_border_layer(&collection, &sphere);

        assert_eq!(layer.countries, 2);
        assert_eq!(layer.points.len(), 6 + 2 + 4);
        assert_eq!(layer.points.len() % 2, 0);
    }
}
