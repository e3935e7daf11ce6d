//! Pick resolution against a loaded index raster.
//!
//! The raster arrives asynchronously and may be requested more than once
//! (for example when the asset base changes). Every request takes a
//! [`LoadTicket`]; only the result for the most recently issued ticket is
//! installed, so a slow stale load can never replace a newer raster.

use glam::DVec3;

use fluxglobe_geom::{
    GeoCoordinate, IndexRaster, Sphere, resolve_entity, resolve_geographic, resolve_index,
};

use crate::error::{Error, Result};
use crate::types::IndexedCountry;

/// Identifies one raster load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoadTicket(u64);

/// Result of resolving a picked point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pick<'a> {
    pub coordinate: GeoCoordinate,
    /// Region index under the coordinate, 0 for none.
    pub index: u8,
    /// Country for the index, if any.
    pub country: Option<&'a IndexedCountry>,
}

/// Maps picked points to countries.
#[derive(Debug, Clone)]
pub struct PickResolver {
    sphere: Sphere,
    countries: Vec<IndexedCountry>,
    raster: Option<IndexRaster>,
    latest: u64,
}

impl PickResolver {
    #[must_use]
    pub fn new(sphere: Sphere, countries: Vec<IndexedCountry>) -> Self {
        Self {
            sphere,
            countries,
            raster: None,
            latest: 0,
        }
    }

    #[must_use]
    pub fn sphere(&self) -> &Sphere {
        &self.sphere
    }

    #[must_use]
    pub fn countries(&self) -> &[IndexedCountry] {
        &self.countries
    }

    pub fn set_countries(&mut self, countries: Vec<IndexedCountry>) {
        self.countries = countries;
    }

    /// Whether a raster has been installed.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.raster.is_some()
    }

    /// Issue a ticket for a new raster load. Earlier tickets become stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest += 1;
        LoadTicket(self.latest)
    }

    /// Install the raster for `ticket` if it is still the latest one.
    ///
    /// Returns whether the raster was installed.
    pub fn finish_load(&mut self, ticket: LoadTicket, raster: IndexRaster) -> bool {
        if ticket.0 != self.latest {
            tracing::warn!(
                ticket = ticket.0,
                latest = self.latest,
                "dropping stale index raster"
            );
            return false;
        }
        tracing::debug!(
            width = raster.width(),
            height = raster.height(),
            "installed index raster"
        );
        self.raster = Some(raster);
        true
    }

    /// Resolve a point on (or above) the sphere.
    pub fn pick(&self, point: DVec3) -> Result<Pick<'_>> {
        self.pick_coordinate(resolve_geographic(point, &self.sphere))
    }

    /// Resolve a coordinate.
    pub fn pick_coordinate(&self, coordinate: GeoCoordinate) -> Result<Pick<'_>> {
        let raster = self.raster.as_ref().ok_or(Error::AssetUnavailable {
            asset: "index raster",
        })?;
        let index = resolve_index(coordinate, raster);
        Ok(Pick {
            coordinate,
            index,
            country: resolve_entity(index, &self.countries),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Map;

    fn country(name: &str) -> IndexedCountry {
        IndexedCountry {
            name: name.to_string(),
            code: None,
            code3: None,
            extra: Map::new(),
        }
    }

    fn resolver() -> PickResolver {
        PickResolver::new(
            Sphere::at_origin(300.0).unwrap(),
            vec![country("France"), country("Japan")],
        )
    }

    /// 4x2 raster: left half index 1, right half index 2, top-left pixel 0.
    fn halves() -> IndexRaster {
        IndexRaster::from_red_channel(4, 2, vec![0, 1, 2, 2, 1, 1, 2, 2]).unwrap()
    }

    #[test]
    fn test_pick_before_load_is_unavailable() {
        let resolver = resolver();
        assert!(!resolver.is_ready());
        assert!(matches!(
            resolver.pick(DVec3::new(300.0, 0.0, 0.0)),
            Err(Error::AssetUnavailable { .. })
        ));
    }

    #[test]
    fn test_pick_resolves_country() {
        let mut resolver = resolver();
        let ticket = resolver.begin_load();
        assert!(resolver.finish_load(ticket, halves()));

        // lon 0 on the equator lands on pixel (2, 1).
        let pick = resolver.pick(DVec3::new(300.0, 0.0, 0.0)).unwrap();
        assert_eq!(pick.index, 2);
        assert_eq!(pick.country.map(|c| c.name.as_str()), Some("Japan"));

        // Far west in the north lands on pixel (0, 0), which is index 0.
        let coordinate = GeoCoordinate::new(10.0, -170.0).unwrap();
        let pick = resolver.pick_coordinate(coordinate).unwrap();
        assert_eq!(pick.index, 0);
        assert_eq!(pick.country, None);
    }

    #[test]
    fn test_latest_ticket_wins() {
        let mut resolver = resolver();
        let first = resolver.begin_load();
        let second = resolver.begin_load();

        let newer = IndexRaster::from_red_channel(1, 1, vec![1]).unwrap();
        let older = IndexRaster::from_red_channel(1, 1, vec![2]).unwrap();
        assert!(resolver.finish_load(second, newer));
        assert!(!resolver.finish_load(first, older));

        let pick = resolver
            .pick_coordinate(GeoCoordinate::new(0.0, 0.0).unwrap())
            .unwrap();
        assert_eq!(pick.index, 1);
    }

    #[test]
    fn test_stale_result_before_latest_arrives() {
        let mut resolver = resolver();
        let first = resolver.begin_load();
        let _second = resolver.begin_load();
        assert!(!resolver.finish_load(first, halves()));
        assert!(!resolver.is_ready());
    }
}
