//! Byte caches for fetched assets.
//!
//! Assets are keyed by their location (URL or file path). The client checks
//! the cache before touching the network or the file system and stores
//! every successful fetch.
//!
//! - [`MemoryCache`]: in-memory store with an optional byte budget
//! - [`NoCache`]: stores nothing

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::{Error, Result};

/// Future returned by [`Cache::get`].
pub type GetFuture<'a> = Pin<Box<dyn Future<Output = Result<Option<Vec<u8>>>> + Send + 'a>>;

/// Future returned by the mutating [`Cache`] operations.
pub type CacheFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>>;

/// Future returned by [`Cache::contains`].
pub type ContainsFuture<'a> = Pin<Box<dyn Future<Output = Result<bool>> + Send + 'a>>;

/// A store for raw asset bytes.
pub trait Cache: Send + Sync {
    /// Cached bytes for `key`, or `None` on a miss.
    fn get(&self, key: &str) -> GetFuture<'_>;

    /// Store bytes under `key`, replacing any previous entry.
    fn put(&self, key: &str, data: Vec<u8>) -> CacheFuture<'_>;

    fn contains(&self, key: &str) -> ContainsFuture<'_>;

    fn remove(&self, key: &str) -> CacheFuture<'_>;

    fn clear(&self) -> CacheFuture<'_>;
}

/// A cache that never stores anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl Cache for NoCache {
    fn get(&self, _key: &str) -> GetFuture<'_> {
        Box::pin(async { Ok(None) })
    }

    fn put(&self, _key: &str, _data: Vec<u8>) -> CacheFuture<'_> {
        Box::pin(async { Ok(()) })
    }

    fn contains(&self, _key: &str) -> ContainsFuture<'_> {
        Box::pin(async { Ok(false) })
    }

    fn remove(&self, _key: &str) -> CacheFuture<'_> {
        Box::pin(async { Ok(()) })
    }

    fn clear(&self) -> CacheFuture<'_> {
        Box::pin(async { Ok(()) })
    }
}

/// An in-memory cache shared between clones.
///
/// With a byte budget, the oldest entries are evicted until a new entry
/// fits. An entry larger than the whole budget is still stored, alone.
#[derive(Debug, Clone, Default)]
pub struct MemoryCache {
    store: Arc<RwLock<Store>>,
    max_bytes: Option<usize>,
}

#[derive(Debug, Default)]
struct Store {
    entries: HashMap<String, Vec<u8>>,
    /// Keys in insertion order, oldest first.
    order: VecDeque<String>,
    bytes: usize,
}

impl Store {
    fn take(&mut self, key: &str) -> Option<Vec<u8>> {
        let data = self.entries.remove(key)?;
        self.bytes -= data.len();
        self.order.retain(|k| k != key);
        Some(data)
    }

    fn evict_for(&mut self, incoming: usize, max_bytes: usize) {
        while self.bytes + incoming > max_bytes {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            if let Some(data) = self.entries.remove(&oldest) {
                self.bytes -= data.len();
                tracing::trace!(key = %oldest, bytes = data.len(), "evicted");
            }
        }
    }
}

fn poisoned<T>(operation: &'static str) -> impl FnOnce(PoisonError<T>) -> Error {
    move |e| Error::Cache {
        operation,
        message: e.to_string(),
    }
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that holds at most `max_bytes` of asset data.
    #[must_use]
    pub fn with_max_bytes(max_bytes: usize) -> Self {
        Self {
            store: Arc::default(),
            max_bytes: Some(max_bytes),
        }
    }

    /// Total bytes currently cached.
    pub fn bytes(&self) -> Result<usize> {
        Ok(self.store.read().map_err(poisoned("size"))?.bytes)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.store.read().map_err(poisoned("len"))?.entries.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn insert(&self, key: &str, data: Vec<u8>) -> Result<()> {
        let mut store = self.store.write().map_err(poisoned("put"))?;
        store.take(key);
        if let Some(max_bytes) = self.max_bytes {
            store.evict_for(data.len(), max_bytes);
        }
        store.bytes += data.len();
        store.order.push_back(key.to_string());
        store.entries.insert(key.to_string(), data);
        Ok(())
    }
}

impl Cache for MemoryCache {
    fn get(&self, key: &str) -> GetFuture<'_> {
        let result = self
            .store
            .read()
            .map_err(poisoned("get"))
            .map(|store| store.entries.get(key).cloned());
        Box::pin(async move { result })
    }

    fn put(&self, key: &str, data: Vec<u8>) -> CacheFuture<'_> {
        let result = self.insert(key, data);
        Box::pin(async move { result })
    }

    fn contains(&self, key: &str) -> ContainsFuture<'_> {
        let result = self
            .store
            .read()
            .map_err(poisoned("contains"))
            .map(|store| store.entries.contains_key(key));
        Box::pin(async move { result })
    }

    fn remove(&self, key: &str) -> CacheFuture<'_> {
        let result = self.store.write().map_err(poisoned("remove")).map(|mut store| {
            store.take(key);
        });
        Box::pin(async move { result })
    }

    fn clear(&self) -> CacheFuture<'_> {
        let result = self.store.write().map_err(poisoned("clear")).map(|mut store| {
            *store = Store::default();
        });
        Box::pin(async move { result })
    }
}
