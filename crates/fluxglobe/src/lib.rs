//! Asset loading, picking and scene layers for flux globes.
//!
//! This crate sits between the pure geometry of `fluxglobe-geom` and a
//! front end. It loads the globe's data assets over HTTP or from disk,
//! resolves picks against the index raster, builds the flux and border
//! layers, and packs them into renderer-facing buffers.
//!
//! # Design principles
//!
//! - **Runtime-agnostic**: async methods return plain futures and work with
//!   any executor that can drive `reqwest`
//! - **Sync geometry**: all geometry is computed synchronously by
//!   `fluxglobe-geom`; only I/O is async
//! - **Latest load wins**: raster loads are ticketed so stale results are
//!   dropped
//!
//! # Example
//!
//! ```ignore
//! use fluxglobe::{AssetBase, Client, MemoryCache};
//!
//! let client = Client::with_cache(AssetBase::from("assets/data"), MemoryCache::new());
//! let capitals = client.fetch_capitals().await?;
//! let borders = client.fetch_borders().await?;
//! ```

pub mod cache;
mod client;
mod error;
pub mod geocode;
pub mod layers;
pub mod resolver;
pub mod scene;
pub mod types;

pub use cache::{Cache, MemoryCache, NoCache};
pub use client::{AssetBase, Client};
pub use error::{Error, Result};
pub use geocode::ReverseGeocoder;
pub use layers::{BorderLayer, Flux, build_border_layer, build_flux_layer};
pub use resolver::{LoadTicket, Pick, PickResolver};
pub use scene::{
    Color, FluxBuffer, FluxMaterial, FrameContext, LineBuffer, LineTopology, MeshBuffer, Scene,
};
pub use types::{AssetPaths, Capital, IndexedCountry};

// Re-export geometry types for convenience.
pub use fluxglobe_geom::{DVec3, FluxStyle, GeoCoordinate, Sphere};
