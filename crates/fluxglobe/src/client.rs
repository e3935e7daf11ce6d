//! Asset client for the globe's data files.
//!
//! Assets live either behind an HTTP base URL or in a local directory. Both
//! are read through the same cache, keyed by the asset's full location.

use std::path::PathBuf;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use fluxglobe_geom::{FeatureCollection, IndexRaster};

use crate::cache::{Cache, NoCache};
use crate::error::{Error, Result};
use crate::types::{AssetPaths, Capital, IndexedCountry};

/// Where assets are loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetBase {
    /// Base URL, always ending in `/`.
    Http(String),
    /// Local directory.
    Directory(PathBuf),
}

impl AssetBase {
    fn locate(&self, name: &str) -> String {
        match self {
            AssetBase::Http(base) => format!("{base}{name}"),
            AssetBase::Directory(dir) => dir.join(name).to_string_lossy().into_owned(),
        }
    }
}

impl From<&str> for AssetBase {
    /// `http://` and `https://` prefixes select HTTP, anything else is a path.
    fn from(value: &str) -> Self {
        if value.starts_with("http://") || value.starts_with("https://") {
            let mut base = value.to_string();
            if !base.ends_with('/') {
                base.push('/');
            }
            AssetBase::Http(base)
        } else {
            AssetBase::Directory(PathBuf::from(value))
        }
    }
}

/// Loads and parses the globe's assets.
///
/// # Example
///
/// ```ignore
/// let client = Client::new(AssetBase::from("assets/data"));
/// let capitals = client.fetch_capitals().await?;
/// ```
pub struct Client<C: Cache = NoCache> {
    http: reqwest::Client,
    cache: Arc<C>,
    base: AssetBase,
    paths: AssetPaths,
}

impl Client<NoCache> {
    /// Create a client with default asset names and no caching.
    #[must_use]
    pub fn new(base: AssetBase) -> Self {
        Self::with_cache(base, NoCache)
    }
}

impl<C: Cache> Client<C> {
    #[must_use]
    pub fn with_cache(base: AssetBase, cache: C) -> Self {
        Self {
            http: reqwest::Client::new(),
            cache: Arc::new(cache),
            base,
            paths: AssetPaths::default(),
        }
    }

    /// Override the asset file names.
    #[must_use]
    pub fn with_paths(mut self, paths: AssetPaths) -> Self {
        self.paths = paths;
        self
    }

    /// Use a preconfigured HTTP client.
    #[must_use]
    pub fn with_http(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    #[must_use]
    pub fn base(&self) -> &AssetBase {
        &self.base
    }

    #[must_use]
    pub fn paths(&self) -> &AssetPaths {
        &self.paths
    }

    /// Fetch the flux destinations.
    pub async fn fetch_capitals(&self) -> Result<Vec<Capital>> {
        let data = self.fetch_bytes(&self.paths.capitals).await?;
        parse_json("capitals", &data)
    }

    /// Fetch the country table addressed by the index raster.
    pub async fn fetch_indexed_countries(&self) -> Result<Vec<IndexedCountry>> {
        let data = self.fetch_bytes(&self.paths.indexed_countries).await?;
        parse_json("indexed countries", &data)
    }

    /// Fetch the country borders.
    pub async fn fetch_borders(&self) -> Result<FeatureCollection> {
        let data = self.fetch_bytes(&self.paths.borders).await?;
        Ok(FeatureCollection::from_slice(&data)?)
    }

    /// Fetch and decode the index raster.
    pub async fn fetch_index_raster(&self) -> Result<IndexRaster> {
        let data = self.fetch_bytes(&self.paths.index_raster).await?;
        Ok(IndexRaster::decode(&data)?)
    }

    /// Fetch raw bytes of an asset, using the cache if available.
    async fn fetch_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let location = self.base.locate(name);

        if let Some(data) = self.cache.get(&location).await? {
            tracing::debug!(%location, "cache hit");
            return Ok(data);
        }

        tracing::debug!(%location, "fetching");
        let data = match &self.base {
            AssetBase::Http(_) => self.fetch_http(&location).await?,
            AssetBase::Directory(_) => {
                tokio::fs::read(&location).await.map_err(|e| Error::Io {
                    path: location.clone(),
                    message: e.to_string(),
                })?
            }
        };

        self.cache.put(&location, data.clone()).await?;
        Ok(data)
    }

    async fn fetch_http(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Http {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let data = response.bytes().await.map_err(|e| Error::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(data.to_vec())
    }
}

fn parse_json<T: DeserializeOwned>(context: &'static str, data: &[u8]) -> Result<T> {
    serde_json::from_slice(data).map_err(|e| Error::Json {
        context,
        message: e.to_string(),
    })
}
