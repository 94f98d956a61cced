//! Group Namespace Module
//!
//! A named cache namespace that fills itself through a loader on miss.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::cache::{ByteView, CacheStats, CacheStore};
use crate::error::{CacheError, Result};

// == Loader ==
/// Source of truth consulted when a key is not cached.
///
/// Any `Fn(&str) -> anyhow::Result<Vec<u8>>` closure is a loader.
pub trait Loader: Send + Sync {
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>>;
}

impl<F> Loader for F
where
    F: Fn(&str) -> anyhow::Result<Vec<u8>> + Send + Sync,
{
    fn load(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        self(key)
    }
}

// == Group ==
/// Named cache namespace with its own byte budget and loader.
pub struct Group {
    name: String,
    loader: Arc<dyn Loader>,
    main_cache: CacheStore,
    loads: AtomicU64,
    load_errors: AtomicU64,
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Group")
            .field("name", &self.name)
            .field("main_cache", &self.main_cache)
            .finish_non_exhaustive()
    }
}

impl Group {
    /// Starts building a group registered under `name`.
    pub fn builder(name: impl Into<String>) -> GroupBuilder {
        GroupBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Get ==
    /// Returns the cached value for `key`, loading and caching it on a miss.
    ///
    /// Concurrent misses on one key may each call the loader; the last value
    /// stored wins. Loader errors are returned unchanged and nothing is cached.
    ///
    /// # Errors
    /// - `CacheError::InvalidArgument` if `key` is empty
    /// - `CacheError::Loader` if the loader fails
    pub fn get(&self, key: &str) -> Result<ByteView> {
        if key.is_empty() {
            return Err(CacheError::InvalidArgument("key is required".to_string()));
        }

        if let Some(value) = self.main_cache.get(key) {
            debug!("[{}] cache hit for key '{}'", self.name, key);
            return Ok(value);
        }

        self.load(key)
    }

    // == Stats ==
    /// Returns a snapshot of cache and loader counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.main_cache.stats();
        stats.loads = self.loads.load(Ordering::Relaxed);
        stats.load_errors = self.load_errors.load(Ordering::Relaxed);
        stats
    }

    fn load(&self, key: &str) -> Result<ByteView> {
        self.get_locally(key)
    }

    fn get_locally(&self, key: &str) -> Result<ByteView> {
        debug!("[{}] cache miss for key '{}', calling loader", self.name, key);

        let bytes = self.loader.load(key).map_err(|err| {
            self.load_errors.fetch_add(1, Ordering::Relaxed);
            warn!("[{}] loader failed for key '{}': {:#}", self.name, key, err);
            CacheError::Loader(err)
        })?;
        self.loads.fetch_add(1, Ordering::Relaxed);

        let value = ByteView::from(bytes);
        self.populate_cache(key, value.clone());
        Ok(value)
    }

    fn populate_cache(&self, key: &str, value: ByteView) {
        self.main_cache.add(key, value);
    }
}

// == Group Builder ==
/// Configures a `Group`; the loader is mandatory.
pub struct GroupBuilder {
    name: String,
    cache_bytes: i64,
    loader: Option<Arc<dyn Loader>>,
}

impl GroupBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cache_bytes: 0,
            loader: None,
        }
    }

    /// Byte budget of the group's cache, 0 (the default) for unbounded.
    pub fn cache_bytes(mut self, cache_bytes: i64) -> Self {
        self.cache_bytes = cache_bytes;
        self
    }

    pub fn loader(mut self, loader: impl Loader + 'static) -> Self {
        self.loader = Some(Arc::new(loader));
        self
    }

    /// Uses a loader already shared with other groups.
    pub fn shared_loader(mut self, loader: Arc<dyn Loader>) -> Self {
        self.loader = Some(loader);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // == Build ==
    /// # Errors
    /// `CacheError::MissingLoader` if no loader was set.
    pub fn build(self) -> Result<Group> {
        let loader = self
            .loader
            .ok_or_else(|| CacheError::MissingLoader(self.name.clone()))?;

        Ok(Group {
            main_cache: CacheStore::new(self.cache_bytes),
            name: self.name,
            loader,
            loads: AtomicU64::new(0),
            load_errors: AtomicU64::new(0),
        })
    }
}
