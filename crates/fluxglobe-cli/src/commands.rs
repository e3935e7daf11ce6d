//! Subcommand implementations.

use std::error::Error;

use glam::DVec3;
use serde::Serialize;

use fluxglobe::{
    BorderLayer, FluxBuffer, FluxMaterial, FrameContext, GeoCoordinate, LineBuffer, LineTopology,
    PickResolver, ReverseGeocoder, Scene, Sphere, build_border_layer, build_flux_layer,
};

use crate::launch_params::{BakeArgs, PickArgs};
use crate::loader::{SharedClient, spawn_load};

/// Errors surfaced to `main`.
pub type CommandResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Load the assets and build the overlay scene.
pub async fn bake(
    client: &SharedClient,
    sphere: Sphere,
    args: &BakeArgs,
) -> CommandResult<Scene> {
    let home = GeoCoordinate::new(args.home_lat, args.home_lon)?;

    // Start both downloads before waiting on either.
    let capitals_rx = spawn_load(client, |client| async move { client.fetch_capitals().await });
    let borders_rx = (!args.no_borders)
        .then(|| spawn_load(client, |client| async move { client.fetch_borders().await }));

    let capitals = capitals_rx.recv().await??;
    tracing::info!("Loaded {} capitals", capitals.len());

    let fluxes = build_flux_layer(home, &capitals, &sphere, args.style.into(), args.samples)?;

    let borders = match borders_rx {
        Some(rx) => {
            let collection = rx.recv().await??;
            build_border_layer(&collection, &sphere)
        }
        None => BorderLayer::default(),
    };
    tracing::info!(
        "Built {} fluxes and borders for {} countries",
        fluxes.len(),
        borders.countries
    );

    let material = FluxMaterial::from(args.material);
    let mut frame = FrameContext::new(&material);
    for _ in 0..args.frames {
        frame.advance();
    }

    Ok(Scene {
        material,
        frame,
        fluxes: fluxes
            .iter()
            .map(|flux| FluxBuffer::from(&flux.geometry))
            .collect(),
        borders: LineBuffer::from_points(&borders.points, LineTopology::Segments),
    })
}

/// Where a pick's country came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PickSource {
    IndexRaster,
    Nominatim,
}

/// Printed result of a pick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickReport {
    pub latitude: f64,
    pub longitude: f64,
    /// Region index, when the raster was available.
    pub index: Option<u8>,
    pub country: Option<String>,
    pub source: Option<PickSource>,
}

/// Resolve a pick against the index raster, optionally falling back to
/// Nominatim.
pub async fn pick(
    client: &SharedClient,
    sphere: Sphere,
    args: &PickArgs,
) -> CommandResult<PickReport> {
    let target = pick_target(args)?;

    let mut resolver = PickResolver::new(sphere, Vec::new());
    let ticket = resolver.begin_load();
    let raster_rx = spawn_load(client, |client| async move { client.fetch_index_raster().await });
    let countries_rx =
        spawn_load(client, |client| async move { client.fetch_indexed_countries().await });

    match countries_rx.recv().await? {
        Ok(countries) => resolver.set_countries(countries),
        Err(e) => tracing::warn!("country table unavailable: {e}"),
    }
    match raster_rx.recv().await? {
        Ok(raster) => {
            resolver.finish_load(ticket, raster);
        }
        Err(e) => tracing::warn!("index raster unavailable: {e}"),
    }

    let coordinate = match target {
        PickTarget::Coordinate(coordinate) => coordinate,
        PickTarget::Point(point) => fluxglobe_geom::resolve_geographic(point, resolver.sphere()),
    };

    let mut report = PickReport {
        latitude: coordinate.latitude(),
        longitude: coordinate.longitude(),
        index: None,
        country: None,
        source: None,
    };
    match resolver.pick_coordinate(coordinate) {
        Ok(pick) => {
            report.index = Some(pick.index);
            if let Some(country) = pick.country {
                report.country = Some(country.name.clone());
                report.source = Some(PickSource::IndexRaster);
            }
        }
        Err(e) => tracing::warn!("{e}"),
    }

    if report.country.is_none() && args.online {
        let geocoder = ReverseGeocoder::new()?;
        if let Some(country) = geocoder.country_at(coordinate).await? {
            report.country = Some(country);
            report.source = Some(PickSource::Nominatim);
        }
    }

    Ok(report)
}

enum PickTarget {
    Coordinate(GeoCoordinate),
    Point(DVec3),
}

fn pick_target(args: &PickArgs) -> CommandResult<PickTarget> {
    match (args.point, args.lat, args.lon) {
        (Some(point), _, _) => Ok(PickTarget::Point(point)),
        (None, Some(lat), Some(lon)) => Ok(PickTarget::Coordinate(GeoCoordinate::new(lat, lon)?)),
        _ => Err("pick needs --lat and --lon, or --point".into()),
    }
}
