//! Sphere geometry for flux globes.
//!
//! This crate turns geographic coordinates into points on (or above) a
//! sphere and builds the curves drawn between them: quadratic, cubic and
//! double-cubic Bézier arcs, an extruded ribbon, and country borders as
//! line-segment pairs. It also resolves picked points back to coordinates
//! and region indices.
//!
//! All functions are pure and synchronous; loading the inputs is left to
//! the caller.
//!
//! # Example
//!
//! ```
//! use fluxglobe_geom::{ArcKind, GeoCoordinate, Sphere, build_arc};
//!
//! let sphere = Sphere::at_origin(300.0)?;
//! let nantes = GeoCoordinate::new(47.21176, -1.573)?;
//! let tokyo = GeoCoordinate::new(35.6895, 139.6917)?;
//!
//! let arc = build_arc(ArcKind::DoubleCubic, nantes, tokyo, &sphere, 50)?;
//! assert_eq!(arc.len(), 50);
//! assert_eq!(arc.points()[0], sphere.surface_point(nantes));
//! # Ok::<(), fluxglobe_geom::GeomError>(())
//! ```

pub mod arc;
pub mod bezier;
pub mod border;
pub mod coords;
mod error;
pub mod flux;
pub mod geojson;
pub mod midpoint;
pub mod pick;
pub mod ribbon;

pub use arc::{ArcKind, DEFAULT_SAMPLE_COUNT, FluxArc, build_arc};
pub use border::{project_geometry, project_polygon, project_ring};
pub use coords::{GeoCoordinate, Sphere, normalize_longitude, to_cartesian, to_geographic};
pub use error::{GeomError, GeomResult};
pub use flux::{FluxGeometry, FluxStyle, build_flux};
pub use geojson::{Feature, FeatureCollection, PolygonGeometry, Ring};
pub use midpoint::midpoint;
pub use pick::{IndexRaster, resolve_entity, resolve_geographic, resolve_index};
pub use ribbon::{Ribbon, build_ribbon};

// Re-export the vector type used throughout the public API.
pub use glam::DVec3;
