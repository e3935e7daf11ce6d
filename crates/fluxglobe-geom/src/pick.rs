//! Resolving a picked point to a region index and an entity.
//!
//! The index raster is an equirectangular image whose red channel holds a
//! region index per pixel: 0 is "no region", `k > 0` refers to entry `k - 1`
//! of an indexed entity table.

use glam::DVec3;

use crate::coords::{GeoCoordinate, Sphere, to_geographic};
use crate::error::{GeomError, GeomResult};

/// Red channel of a decoded index raster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexRaster {
    width: u32,
    height: u32,
    red: Vec<u8>,
}

impl IndexRaster {
    /// Build a raster from row-major red channel values.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or do not match the data.
    pub fn from_red_channel(width: u32, height: u32, red: Vec<u8>) -> GeomResult<Self> {
        let expected = (width as usize) * (height as usize);
        if width == 0 || height == 0 || red.len() != expected {
            return Err(GeomError::InvalidFormat {
                context: "index raster",
                detail: format!(
                    "{width}x{height} raster needs {expected} values, got {}",
                    red.len()
                ),
            });
        }
        Ok(Self { width, height, red })
    }

    /// Decode an encoded image (PNG or JPEG) and keep its red channel.
    pub fn decode(data: &[u8]) -> GeomResult<Self> {
        let image = image::load_from_memory(data).map_err(|e| GeomError::InvalidFormat {
            context: "index raster",
            detail: e.to_string(),
        })?;
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let red = rgba.pixels().map(|pixel| pixel.0[0]).collect();
        Self::from_red_channel(width, height, red)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Red value at a pixel, or `None` outside the raster.
    #[must_use]
    pub fn red_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.red
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

/// Pixel holding a coordinate.
///
/// ```text
/// x = floor( lon / 360 * width + width / 2)   mod width
/// y = floor(-lat / 360 * width + height / 2)  mod height
/// ```
///
/// Both axes scale by the width, which matches a 2:1 equirectangular image.
#[must_use]
pub fn raster_pixel(coord: GeoCoordinate, width: u32, height: u32) -> (u32, u32) {
    let w = f64::from(width);
    let h = f64::from(height);
    let x = (coord.longitude() / 360.0 * w + w / 2.0).floor();
    let y = (-coord.latitude() / 360.0 * w + h / 2.0).floor();
    (wrap(x, width), wrap(y, height))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn wrap(value: f64, size: u32) -> u32 {
    // Coordinates are bounded, so the floored value always fits an i64.
    (value as i64).rem_euclid(i64::from(size)) as u32
}

/// Region index at a coordinate.
#[must_use]
pub fn resolve_index(coord: GeoCoordinate, raster: &IndexRaster) -> u8 {
    let (x, y) = raster_pixel(coord, raster.width, raster.height);
    raster.red_at(x, y).unwrap_or(0)
}

/// Coordinate of a picked point on (or above) the sphere.
#[must_use]
pub fn resolve_geographic(point: DVec3, sphere: &Sphere) -> GeoCoordinate {
    to_geographic(point, sphere)
}

/// Entity for a region index: `None` for 0 or an index past the table.
#[must_use]
pub fn resolve_entity<T>(index: u8, table: &[T]) -> Option<&T> {
    let slot = usize::from(index).checked_sub(1)?;
    table.get(slot)
}
