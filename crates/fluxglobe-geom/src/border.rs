//! Border projection as line-segment pairs.
//!
//! Rings are emitted for a renderer drawing disconnected segments: every
//! consecutive pair of output points is one segment. The first and last
//! vertex of a ring appear once, interior vertices twice. Rings are not
//! closed automatically.

use glam::DVec3;

use crate::coords::{GeoCoordinate, Sphere};
use crate::geojson::{PolygonGeometry, Ring};

/// Append the segment pairs of one ring to `out`.
///
/// Rings with fewer than two vertices contribute nothing.
pub fn project_ring(ring: &[GeoCoordinate], sphere: &Sphere, out: &mut Vec<DVec3>) {
    let [first, interior @ .., last] = ring else {
        return;
    };

    out.reserve(2 * ring.len() - 2);
    out.push(sphere.surface_point(*first));
    for &coord in interior {
        let point = sphere.surface_point(coord);
        out.push(point);
        out.push(point);
    }
    out.push(sphere.surface_point(*last));
}

/// Project a polygon (outer ring and holes).
#[must_use]
pub fn project_polygon(rings: &[Ring], sphere: &Sphere) -> Vec<DVec3> {
    let mut out = Vec::new();
    for ring in rings {
        project_ring(ring, sphere, &mut out);
    }
    out
}

/// Project a polygon or multi-polygon, concatenating its polygons.
#[must_use]
pub fn project_geometry(geometry: &PolygonGeometry, sphere: &Sphere) -> Vec<DVec3> {
    match geometry {
        PolygonGeometry::Polygon(rings) => project_polygon(rings, sphere),
        PolygonGeometry::MultiPolygon(polygons) => polygons
            .iter()
            .flat_map(|rings| project_polygon(rings, sphere))
            .collect(),
    }
}
