//! Geographic <-> Cartesian conversion on a sphere.
//!
//! Every component of the workspace shares one axis convention:
//!
//! - `+y` is the polar axis (north pole at `center + (0, r, 0)`)
//! - the prime meridian on the equator lies on `+x`
//! - east longitudes rotate towards `-z`
//!
//! ```text
//! x =  (r + h) * cos(lat) * cos(lon)
//! y =  (r + h) * sin(lat)
//! z = -(r + h) * cos(lat) * sin(lon)
//! ```

use glam::DVec3;

use crate::error::{GeomError, GeomResult};

/// Horizontal distance (relative to the point's length) below which a point
/// counts as lying on the polar axis.
const POLAR_AXIS_EPSILON: f64 = 1e-12;

/// A latitude/longitude pair in degrees.
///
/// Latitude lies in `[-90, 90]`. Longitude is accepted in `[-180, 180]` and
/// stored normalized into `[-180, 180)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    latitude: f64,
    longitude: f64,
}

impl GeoCoordinate {
    /// Create a coordinate, rejecting out-of-range or non-finite values.
    pub fn new(latitude: f64, longitude: f64) -> GeomResult<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(GeomError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        Ok(Self {
            latitude,
            longitude: normalize_longitude(longitude),
        })
    }

    /// Latitude in degrees.
    #[must_use]
    pub fn latitude(self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees, in `[-180, 180)`.
    #[must_use]
    pub fn longitude(self) -> f64 {
        self.longitude
    }

    /// Internal constructor for values already known to be in range.
    pub(crate) fn from_normalized(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: latitude.clamp(-90.0, 90.0),
            longitude: normalize_longitude(longitude),
        }
    }
}

/// The globe body: a center and a strictly positive radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: DVec3,
    radius: f64,
}

impl Sphere {
    /// Create a sphere.
    ///
    /// # Errors
    ///
    /// Returns [`GeomError::InvalidSphere`] if the radius is not strictly
    /// positive or any component is not finite.
    pub fn new(center: DVec3, radius: f64) -> GeomResult<Self> {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return Err(GeomError::InvalidSphere { radius });
        }
        Ok(Self { center, radius })
    }

    /// Create a sphere centered on the origin.
    pub fn at_origin(radius: f64) -> GeomResult<Self> {
        Self::new(DVec3::ZERO, radius)
    }

    #[must_use]
    pub fn center(&self) -> DVec3 {
        self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Project a coordinate onto the sphere surface.
    #[must_use]
    pub fn surface_point(&self, coord: GeoCoordinate) -> DVec3 {
        to_cartesian(coord, self, 0.0)
    }
}

/// Wrap a longitude in degrees into `[-180, 180)`.
#[must_use]
pub fn normalize_longitude(longitude: f64) -> f64 {
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid can round up to exactly 360 for tiny negative inputs.
    if wrapped >= 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// Convert a coordinate to a point `elevation` units above the sphere.
#[must_use]
pub fn to_cartesian(coord: GeoCoordinate, sphere: &Sphere, elevation: f64) -> DVec3 {
    let phi = coord.latitude.to_radians();
    let theta = coord.longitude.to_radians();
    let r = sphere.radius + elevation;

    DVec3::new(
        r * phi.cos() * theta.cos(),
        r * phi.sin(),
        -r * phi.cos() * theta.sin(),
    ) + sphere.center
}

/// Convert a point back to a coordinate.
///
/// The point does not need to lie on the surface: its direction from the
/// center is what counts. Points on the polar axis report longitude 0, and
/// the center itself maps to `(0, 0)`.
#[must_use]
pub fn to_geographic(point: DVec3, sphere: &Sphere) -> GeoCoordinate {
    let p = point - sphere.center;
    let length = p.length();
    if length == 0.0 || !length.is_finite() {
        return GeoCoordinate::from_normalized(0.0, 0.0);
    }

    let latitude = (p.y / length).clamp(-1.0, 1.0).asin().to_degrees();

    let horizontal = p.x.hypot(p.z);
    let longitude = if horizontal <= POLAR_AXIS_EPSILON * length {
        0.0
    } else {
        (-p.z).atan2(p.x).to_degrees()
    };

    GeoCoordinate::from_normalized(latitude, longitude)
}
