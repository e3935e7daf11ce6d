//! Error types for the fluxglobe crate.

use std::fmt;

use fluxglobe_geom::GeomError;

/// Result type for fluxglobe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading assets or resolving picks.
#[derive(Debug)]
pub enum Error {
    /// HTTP request failed.
    Http {
        /// The URL that failed.
        url: String,
        /// The error message.
        message: String,
    },
    /// HTTP response had a non-success status code.
    HttpStatus {
        /// The URL that returned the error.
        url: String,
        /// The HTTP status code.
        status: u16,
    },
    /// Reading a local asset failed.
    Io {
        /// The path that failed.
        path: String,
        /// The error message.
        message: String,
    },
    /// An asset was not valid JSON for its record type.
    Json {
        /// Which asset was being parsed.
        context: &'static str,
        /// The error message.
        message: String,
    },
    /// Geometry construction or asset decoding failed.
    Geom(GeomError),
    /// Cache operation failed.
    Cache {
        /// The operation that failed.
        operation: &'static str,
        /// The error message.
        message: String,
    },
    /// A required asset has not been loaded yet.
    AssetUnavailable {
        /// The asset that is missing.
        asset: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Http { url, message } => {
                write!(f, "http request to {url} failed: {message}")
            }
            Error::HttpStatus { url, status } => {
                write!(f, "http request to {url} returned status {status}")
            }
            Error::Io { path, message } => write!(f, "failed to read {path}: {message}"),
            Error::Json { context, message } => {
                write!(f, "failed to parse {context}: {message}")
            }
            Error::Geom(e) => write!(f, "geometry error: {e}"),
            Error::Cache { operation, message } => {
                write!(f, "cache {operation} failed: {message}")
            }
            Error::AssetUnavailable { asset } => write!(f, "{asset} is not loaded"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Geom(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeomError> for Error {
    fn from(e: GeomError) -> Self {
        Error::Geom(e)
    }
}
