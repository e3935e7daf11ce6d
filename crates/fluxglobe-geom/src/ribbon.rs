//! Extruded ribbon geometry along a double-cubic arc.
//!
//! The ribbon is a triangle strip around the arc's centerline. Every interior
//! sample `i` of an `n`-point centerline becomes a pair of vertices offset by
//! `± normal * taper(i) * L / radius`, with `taper(i) = min(i, n - 1 - i)`, so
//! the strip is widest in the middle and pinches to the endpoints.
//!
//! Vertex layout for `m = n - 2` interior samples:
//!
//! ```text
//! 0            first centerline point
//! 1 + 2k       interior sample k, + side
//! 2 + 2k       interior sample k, - side
//! 2m + 1       last centerline point
//! ```

use glam::DVec3;

use crate::arc::{FluxArc, MIN_DOUBLE_CUBIC_SAMPLES, check_samples, double_cubic_arc};
use crate::coords::{GeoCoordinate, Sphere};
use crate::error::GeomResult;

/// Triangulated strip: vertices plus faces of three vertex indices each.
#[derive(Debug, Clone, PartialEq)]
pub struct Ribbon {
    vertices: Vec<DVec3>,
    faces: Vec<[u32; 3]>,
}

impl Ribbon {
    #[must_use]
    pub fn vertices(&self) -> &[DVec3] {
        &self.vertices
    }

    #[must_use]
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Extrude a centerline.
    ///
    /// `chord_length` scales the offset together with the sphere radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the centerline has fewer than three points.
    pub fn from_centerline(
        centerline: &[DVec3],
        chord_length: f64,
        sphere: &Sphere,
    ) -> GeomResult<Self> {
        check_samples(centerline.len(), MIN_DOUBLE_CUBIC_SAMPLES)?;

        let n = centerline.len();
        let first = centerline[0];
        let last = centerline[n - 1];
        let normal = (last - first)
            .cross(sphere.center() - last)
            .normalize_or_zero();
        let step = chord_length / sphere.radius();

        let mut vertices = Vec::with_capacity(2 * n - 2);
        vertices.push(first);
        for (i, &point) in centerline.iter().enumerate().take(n - 1).skip(1) {
            #[allow(clippy::cast_precision_loss)]
            let taper = i.min(n - 1 - i) as f64;
            let offset = normal * (taper * step);
            vertices.push(point + offset);
            vertices.push(point - offset);
        }
        vertices.push(last);

        Ok(Self {
            faces: strip_faces(n - 2),
            vertices,
        })
    }
}

/// Faces for a strip with `interior` offset pairs (at least one).
///
/// A fan opens the strip at vertex 0, each pair of consecutive offset pairs
/// is split into two triangles, and a fan closes it at the last vertex, for
/// `2 * interior` faces in total.
fn strip_faces(interior: usize) -> Vec<[u32; 3]> {
    #[allow(clippy::cast_possible_truncation)]
    let m = interior as u32;
    let mut faces = Vec::with_capacity(2 * interior);

    faces.push([0, 1, 2]);
    for k in 0..m.saturating_sub(1) {
        let a = 1 + 2 * k;
        let (b, c, d) = (a + 1, a + 2, a + 3);
        faces.push([a, b, c]);
        faces.push([b, d, c]);
    }
    faces.push([2 * m - 1, 2 * m, 2 * m + 1]);

    faces
}

/// Build a ribbon following the double-cubic arc between two coordinates.
///
/// # Errors
///
/// Returns an error if `sample_count` is below 3.
pub fn build_ribbon(
    src: GeoCoordinate,
    dst: GeoCoordinate,
    sphere: &Sphere,
    sample_count: usize,
) -> GeomResult<Ribbon> {
    let arc: FluxArc = double_cubic_arc(src, dst, sphere, sample_count)?;
    Ribbon::from_centerline(arc.points(), arc.chord_length(), sphere)
}
