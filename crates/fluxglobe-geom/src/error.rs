//! Error types for geometry operations.

use std::fmt;

/// Errors that can occur while building sphere geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum GeomError {
    /// Latitude or longitude outside its valid range, or not finite.
    InvalidCoordinate { latitude: f64, longitude: f64 },
    /// Sphere radius not strictly positive, or center not finite.
    InvalidSphere { radius: f64 },
    /// Curve requested with too few samples.
    InvalidSampleCount { count: usize, minimum: usize },
    /// Malformed input data (GeoJSON, raster bytes, records).
    InvalidFormat {
        context: &'static str,
        detail: String,
    },
}

impl fmt::Display for GeomError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCoordinate {
                latitude,
                longitude,
            } => {
                write!(
                    f,
                    "invalid coordinate: latitude {latitude}, longitude {longitude}"
                )
            }
            Self::InvalidSphere { radius } => {
                write!(f, "invalid sphere: radius {radius}")
            }
            Self::InvalidSampleCount { count, minimum } => {
                write!(f, "sample count {count} is below the minimum of {minimum}")
            }
            Self::InvalidFormat { context, detail } => {
                write!(f, "invalid format in {context}: {detail}")
            }
        }
    }
}

impl std::error::Error for GeomError {}

/// Result type for geometry operations.
pub type GeomResult<T> = Result<T, GeomError>;
