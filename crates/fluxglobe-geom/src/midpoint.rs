//! Great-circle midpoint.

use crate::coords::GeoCoordinate;

/// Midpoint of the great-circle path between `a` and `b`.
///
/// Uses the spherical bearing formula. This is always the 50% point, not a
/// general interpolation. `midpoint(a, a) == a`; antipodal inputs have no
/// unique midpoint and resolve to whatever `atan2(0, 0)` yields.
#[must_use]
pub fn midpoint(a: GeoCoordinate, b: GeoCoordinate) -> GeoCoordinate {
    let phi1 = a.latitude().to_radians();
    let lambda1 = a.longitude().to_radians();
    let phi2 = b.latitude().to_radians();
    let delta_lambda = (b.longitude() - a.longitude()).to_radians();

    let bearing_x = phi2.cos() * delta_lambda.cos();
    let bearing_y = phi2.cos() * delta_lambda.sin();

    let phi3 = (phi1.sin() + phi2.sin()).atan2(
        ((phi1.cos() + bearing_x) * (phi1.cos() + bearing_x) + bearing_y * bearing_y).sqrt(),
    );
    let lambda3 = lambda1 + bearing_y.atan2(phi1.cos() + bearing_x);

    GeoCoordinate::from_normalized(phi3.to_degrees(), lambda3.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn coord(lat: f64, lon: f64) -> GeoCoordinate {
        GeoCoordinate::new(lat, lon).unwrap()
    }

    fn assert_coord_close(actual: GeoCoordinate, lat: f64, lon: f64) {
        assert!(
            (actual.latitude() - lat).abs() < 1e-9 && (actual.longitude() - lon).abs() < 1e-9,
            "expected ({lat}, {lon}), got {actual:?}"
        );
    }

    #[test]
    fn test_equator_quarter_point() {
        assert_coord_close(midpoint(coord(0.0, 0.0), coord(0.0, 90.0)), 0.0, 45.0);
    }

    #[test]
    fn test_same_point() {
        let c = coord(47.21176, -1.573);
        assert_coord_close(midpoint(c, c), 47.21176, -1.573);
    }

    #[test]
    fn test_same_point_at_pole() {
        let c = coord(90.0, 30.0);
        assert_coord_close(midpoint(c, c), 90.0, 30.0);
    }

    #[test]
    fn test_meridian_midpoint() {
        assert_coord_close(midpoint(coord(-20.0, 10.0), coord(40.0, 10.0)), 10.0, 10.0);
    }

    #[test]
    fn test_crossing_antimeridian() {
        // 170E to 170W passes over the antimeridian.
        let m = midpoint(coord(0.0, 170.0), coord(0.0, -170.0));
        assert!(m.latitude().abs() < 1e-9);
        assert!((m.longitude().abs() - 180.0).abs() < 1e-9);
        assert!(m.longitude() < 180.0);
    }

    #[test]
    fn test_high_latitude_route_bows_poleward() {
        // Great circles between points on the same parallel bend towards the pole.
        let m = midpoint(coord(50.0, -60.0), coord(50.0, 60.0));
        assert!(m.latitude() > 50.0);
        assert!(m.longitude().abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_midpoint_is_symmetric_in_latitude(
            lat1 in -80.0f64..80.0,
            lon1 in -170.0f64..170.0,
            lat2 in -80.0f64..80.0,
            lon2 in -170.0f64..170.0,
        ) {
            prop_assume!((lon1 - lon2).abs() < 150.0);
            let ab = midpoint(coord(lat1, lon1), coord(lat2, lon2));
            let ba = midpoint(coord(lat2, lon2), coord(lat1, lon1));
            prop_assert!((ab.latitude() - ba.latitude()).abs() < 1e-7);
            prop_assert!((ab.longitude() - ba.longitude()).abs() < 1e-7);
        }
    }
}
