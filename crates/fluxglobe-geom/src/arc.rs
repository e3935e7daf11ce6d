//! Curved paths between two points on the sphere.
//!
//! All constructions start from the projected endpoints `S` and `D` and the
//! chord length `L = |S - D|`, and bulge outward from the sphere center:
//!
//! - **Quadratic**: one control point above the chord midpoint, at
//!   `radius + 0.7 L` from the center.
//! - **Cubic**: each endpoint pushed outward along its radial direction by `L`.
//! - **Double-cubic**: two cubic segments joined at the great-circle
//!   midpoint raised by `0.2 L`. The join is C0 only: both segments pass
//!   through it but their tangents generally differ.

use glam::DVec3;

use crate::bezier;
use crate::coords::{GeoCoordinate, Sphere, to_cartesian};
use crate::error::{GeomError, GeomResult};
use crate::midpoint::midpoint;

/// Default number of samples per arc.
pub const DEFAULT_SAMPLE_COUNT: usize = 50;

/// Height of the quadratic control point above the surface, as a fraction of
/// the chord length.
pub const QUADRATIC_LIFT: f64 = 0.7;

/// Distance of each cubic control point from its endpoint, as a fraction of
/// the chord length.
pub const CUBIC_LIFT: f64 = 1.0;

/// Height of the double-cubic join above the surface, as a fraction of the
/// chord length.
pub const DOUBLE_CUBIC_LIFT: f64 = 0.2;

/// Relative length below which a bulge direction counts as vanished.
const DEGENERATE_EPSILON: f64 = 1e-9;

/// Minimum sample count for single-segment curves.
pub const MIN_SAMPLES: usize = 2;

/// Minimum sample count for the double-cubic construction (one point per
/// segment plus the shared join).
pub const MIN_DOUBLE_CUBIC_SAMPLES: usize = 3;

/// Curve construction used for an arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcKind {
    Quadratic,
    Cubic,
    #[default]
    DoubleCubic,
}

impl ArcKind {
    /// Smallest sample count this construction accepts.
    #[must_use]
    pub fn min_samples(self) -> usize {
        match self {
            Self::Quadratic | Self::Cubic => MIN_SAMPLES,
            Self::DoubleCubic => MIN_DOUBLE_CUBIC_SAMPLES,
        }
    }
}

/// A sampled curve from a source to a destination point.
#[derive(Debug, Clone, PartialEq)]
pub struct FluxArc {
    points: Vec<DVec3>,
    chord_length: f64,
}

impl FluxArc {
    /// The sampled points, source first.
    #[must_use]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    #[must_use]
    pub fn into_points(self) -> Vec<DVec3> {
        self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Straight-line distance between the endpoints.
    #[must_use]
    pub fn chord_length(&self) -> f64 {
        self.chord_length
    }
}

/// Projected endpoints shared by every construction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Endpoints {
    pub src: DVec3,
    pub dst: DVec3,
    pub chord: f64,
}

impl Endpoints {
    pub(crate) fn project(src: GeoCoordinate, dst: GeoCoordinate, sphere: &Sphere) -> Self {
        let src = sphere.surface_point(src);
        let dst = sphere.surface_point(dst);
        Self {
            src,
            dst,
            chord: src.distance(dst),
        }
    }
}

/// Build an arc with the given construction.
///
/// # Errors
///
/// Returns [`GeomError::InvalidSampleCount`] if `sample_count` is below
/// [`ArcKind::min_samples`].
pub fn build_arc(
    kind: ArcKind,
    src: GeoCoordinate,
    dst: GeoCoordinate,
    sphere: &Sphere,
    sample_count: usize,
) -> GeomResult<FluxArc> {
    match kind {
        ArcKind::Quadratic => quadratic_arc(src, dst, sphere, sample_count),
        ArcKind::Cubic => cubic_arc(src, dst, sphere, sample_count),
        ArcKind::DoubleCubic => double_cubic_arc(src, dst, sphere, sample_count),
    }
}

/// Single quadratic Bézier with its control point above the chord midpoint.
pub fn quadratic_arc(
    src: GeoCoordinate,
    dst: GeoCoordinate,
    sphere: &Sphere,
    sample_count: usize,
) -> GeomResult<FluxArc> {
    check_samples(sample_count, MIN_SAMPLES)?;
    let ends = Endpoints::project(src, dst, sphere);
    let center = sphere.center();

    let chord_mid = (ends.src + ends.dst) * 0.5;
    let up = outward(chord_mid - center, ends.src - ends.dst, sphere.radius());
    let control = center + up * (sphere.radius() + ends.chord * QUADRATIC_LIFT);

    let points = bezier::sample(sample_count, ends.src, ends.dst, |t| {
        bezier::quadratic(ends.src, control, ends.dst, t)
    });
    Ok(FluxArc {
        points,
        chord_length: ends.chord,
    })
}

/// Single cubic Bézier with both control points pushed radially outward.
pub fn cubic_arc(
    src: GeoCoordinate,
    dst: GeoCoordinate,
    sphere: &Sphere,
    sample_count: usize,
) -> GeomResult<FluxArc> {
    check_samples(sample_count, MIN_SAMPLES)?;
    let ends = Endpoints::project(src, dst, sphere);
    let center = sphere.center();

    let src_control = ends.src + (ends.src - center).normalize() * (ends.chord * CUBIC_LIFT);
    let dst_control = ends.dst + (ends.dst - center).normalize() * (ends.chord * CUBIC_LIFT);

    let points = bezier::sample(sample_count, ends.src, ends.dst, |t| {
        bezier::cubic(ends.src, src_control, dst_control, ends.dst, t)
    });
    Ok(FluxArc {
        points,
        chord_length: ends.chord,
    })
}

/// Two cubic segments meeting above the great-circle midpoint.
///
/// The first segment is `[S, S, M + N L/2, M]` and the second
/// `[M, M - N L/2, D, D]`, where `M` is the raised midpoint and `N` the unit
/// vector from `D` to `S`. Exactly `sample_count` points are produced; the
/// join appears once.
pub fn double_cubic_arc(
    src: GeoCoordinate,
    dst: GeoCoordinate,
    sphere: &Sphere,
    sample_count: usize,
) -> GeomResult<FluxArc> {
    check_samples(sample_count, MIN_DOUBLE_CUBIC_SAMPLES)?;
    let ends = Endpoints::project(src, dst, sphere);

    let mid = to_cartesian(midpoint(src, dst), sphere, ends.chord * DOUBLE_CUBIC_LIFT);
    let normal = (ends.src - ends.dst).normalize_or_zero();
    let src_control = mid + normal * (ends.chord / 2.0);
    let dst_control = mid - normal * (ends.chord / 2.0);

    let first_count = sample_count / 2 + 1;
    let second_count = sample_count - sample_count / 2;

    let mut points = bezier::sample(first_count, ends.src, mid, |t| {
        bezier::cubic(ends.src, ends.src, src_control, mid, t)
    });
    let second = bezier::sample(second_count, mid, ends.dst, |t| {
        bezier::cubic(mid, dst_control, ends.dst, ends.dst, t)
    });
    // Drop the second segment's copy of the join.
    points.extend_from_slice(&second[1..]);

    Ok(FluxArc {
        points,
        chord_length: ends.chord,
    })
}

pub(crate) fn check_samples(count: usize, minimum: usize) -> GeomResult<()> {
    if count < minimum {
        return Err(GeomError::InvalidSampleCount { count, minimum });
    }
    Ok(())
}

/// Unit vector along `direction`, or a direction perpendicular to the chord
/// when `direction` vanishes relative to `scale` (antipodal endpoints).
fn outward(direction: DVec3, chord: DVec3, scale: f64) -> DVec3 {
    if direction.length() > DEGENERATE_EPSILON * scale {
        return direction.normalize();
    }
    let chord = chord.normalize_or_zero();
    [DVec3::Y, DVec3::X]
        .into_iter()
        .find_map(|axis| (axis - chord * axis.dot(chord)).try_normalize())
        .unwrap_or(DVec3::Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coord(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon).unwrap()
    }

    fn globe() -> Sphere {
        Sphere::new(DVec3::new(5.0, -3.0, 1.0), 300.0).unwrap()
    }

    const NANTES: (f64, f64) = (47.21176, -1.573);
    const TOKYO: (f64, f64) = (35.6895, 139.6917);

    fn nantes_to_tokyo(kind: ArcKind, samples: usize) -> FluxArc {
        build_arc(
            kind,
            coord(NANTES.0, NANTES.1),
            coord(TOKYO.0, TOKYO.1),
            &globe(),
            samples,
        )
        .unwrap()
    }

    #[test]
    fn test_endpoints_are_exact_for_every_kind() {
        let sphere = globe();
        let src = sphere.surface_point(coord(NANTES.0, NANTES.1));
        let dst = sphere.surface_point(coord(TOKYO.0, TOKYO.1));

        for kind in [ArcKind::Quadratic, ArcKind::Cubic, ArcKind::DoubleCubic] {
            let arc = nantes_to_tokyo(kind, DEFAULT_SAMPLE_COUNT);
            assert_eq!(arc.points()[0], src, "{kind:?} start");
            assert_eq!(*arc.points().last().unwrap(), dst, "{kind:?} end");
        }
    }

    #[test]
    fn test_sample_counts() {
        assert_eq!(nantes_to_tokyo(ArcKind::Quadratic, 50).len(), 50);
        assert_eq!(nantes_to_tokyo(ArcKind::Cubic, 2).len(), 2);
        assert_eq!(nantes_to_tokyo(ArcKind::DoubleCubic, 50).len(), 50);
        assert_eq!(nantes_to_tokyo(ArcKind::DoubleCubic, 51).len(), 51);
        assert_eq!(nantes_to_tokyo(ArcKind::DoubleCubic, 3).len(), 3);
    }

    #[test]
    fn test_double_cubic_join_not_duplicated() {
        let arc = nantes_to_tokyo(ArcKind::DoubleCubic, 50);
        for pair in arc.points().windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
    }

    #[test]
    fn test_double_cubic_passes_through_raised_midpoint() {
        let sphere = globe();
        let src = coord(NANTES.0, NANTES.1);
        let dst = coord(TOKYO.0, TOKYO.1);
        let arc = double_cubic_arc(src, dst, &sphere, 50).unwrap();

        let expected = to_cartesian(
            midpoint(src, dst),
            &sphere,
            arc.chord_length() * DOUBLE_CUBIC_LIFT,
        );
        // First segment has 26 samples, so the join sits at index 25.
        assert_eq!(arc.points()[25], expected);
    }

    #[test]
    fn test_three_sample_double_cubic() {
        let sphere = globe();
        let src = coord(0.0, 0.0);
        let dst = coord(0.0, 90.0);
        let arc = double_cubic_arc(src, dst, &sphere, 3).unwrap();
        let mid = to_cartesian(coord(0.0, 45.0), &sphere, arc.chord_length() * 0.2);
        assert!((arc.points()[1] - mid).length() < 1e-9);
    }

    #[test]
    fn test_arcs_bulge_outward() {
        let sphere = globe();
        for kind in [ArcKind::Quadratic, ArcKind::Cubic, ArcKind::DoubleCubic] {
            let arc = nantes_to_tokyo(kind, 21);
            let interior = &arc.points()[1..arc.len() - 1];
            for p in interior {
                let height = p.distance(sphere.center()) - sphere.radius();
                assert!(height > 0.0, "{kind:?} dips below the surface");
            }
        }
    }

    #[test]
    fn test_quadratic_control_height() {
        // The middle sample of a 3-point quadratic lies halfway between the
        // chord midpoint and the control point.
        let sphere = Sphere::at_origin(1.0).unwrap();
        let arc = quadratic_arc(coord(0.0, -45.0), coord(0.0, 45.0), &sphere, 3).unwrap();
        let l = arc.chord_length();
        let chord_mid = (45.0f64).to_radians().cos();
        let control = 1.0 + 0.7 * l;
        let apex = arc.points()[1];
        assert!((apex.x - (chord_mid * 0.5 + control * 0.5)).abs() < 1e-12);
        assert!(apex.y.abs() < 1e-12);
        assert!(apex.z.abs() < 1e-12);
    }

    #[test]
    fn test_antipodal_quadratic_is_finite() {
        let sphere = Sphere::at_origin(1.0).unwrap();
        let arc = quadratic_arc(coord(0.0, 0.0), coord(0.0, -180.0), &sphere, 11).unwrap();
        assert!(arc.points().iter().all(|p| p.is_finite()));
        // The bulge goes over the pole.
        assert!(arc.points()[5].y > 1.0);
    }

    #[test]
    fn test_same_endpoints_collapse() {
        let sphere = globe();
        let c = coord(10.0, 20.0);
        for kind in [ArcKind::Quadratic, ArcKind::Cubic, ArcKind::DoubleCubic] {
            let arc = build_arc(kind, c, c, &sphere, 10).unwrap();
            assert_eq!(arc.chord_length(), 0.0);
            let p = sphere.surface_point(c);
            assert!(arc.points().iter().all(|q| q.distance(p) < 1e-9));
        }
    }

    #[test]
    fn test_too_few_samples_rejected() {
        let sphere = globe();
        let c = coord(0.0, 0.0);
        assert_eq!(
            quadratic_arc(c, c, &sphere, 1),
            Err(GeomError::InvalidSampleCount {
                count: 1,
                minimum: 2
            })
        );
        assert!(cubic_arc(c, c, &sphere, 0).is_err());
        assert_eq!(
            double_cubic_arc(c, c, &sphere, 2),
            Err(GeomError::InvalidSampleCount {
                count: 2,
                minimum: 3
            })
        );
    }

    proptest! {
        #[test]
        fn prop_endpoints_exact(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
            samples in 3usize..80,
        ) {
            let sphere = globe();
            let src = coord(lat1, lon1);
            let dst = coord(lat2, lon2);
            for kind in [ArcKind::Quadratic, ArcKind::Cubic, ArcKind::DoubleCubic] {
                let arc = build_arc(kind, src, dst, &sphere, samples).unwrap();
                prop_assert_eq!(arc.len(), samples);
                prop_assert_eq!(arc.points()[0], sphere.surface_point(src));
                prop_assert_eq!(arc.points()[samples - 1], sphere.surface_point(dst));
            }
        }
    }
}
