//! Cache Store Module
//!
//! Thread-safe wrapper around the LRU engine holding a group's `ByteView`s.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{ByteView, CacheStats, LruCache, Sizeable};

// == Cache Store ==
/// Mutex-guarded LRU cache of `ByteView`s with a fixed byte budget.
///
/// The engine is created on the first `add`. The lock is held only for the
/// duration of a single `get` or `add`.
#[derive(Debug)]
pub struct CacheStore {
    inner: Mutex<StoreInner>,
    /// Byte budget handed to the engine, 0 = unbounded
    cache_bytes: i64,
    /// Bumped by the engine's eviction callback
    evictions: Arc<AtomicU64>,
}

#[derive(Debug, Default)]
struct StoreInner {
    lru: Option<LruCache<ByteView>>,
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    ///
    /// # Arguments
    /// * `cache_bytes` - Byte budget for keys plus values, 0 for unbounded
    pub fn new(cache_bytes: i64) -> Self {
        Self {
            inner: Mutex::new(StoreInner::default()),
            cache_bytes,
            evictions: Arc::new(AtomicU64::new(0)),
        }
    }

    // == Get ==
    /// Looks up a key, promoting it on a hit.
    pub fn get(&self, key: &str) -> Option<ByteView> {
        let mut inner = self.inner.lock();
        let value = inner.lru.as_mut().and_then(|lru| lru.get(key).cloned());

        match value {
            Some(_) => inner.stats.record_hit(),
            None => inner.stats.record_miss(),
        }
        value
    }

    // == Add ==
    /// Stores a value, evicting least recently used entries as needed.
    pub fn add(&self, key: impl Into<String>, value: ByteView) {
        let mut inner = self.inner.lock();
        inner
            .lru
            .get_or_insert_with(|| self.build_lru())
            .add(key, value);
    }

    // == Stats ==
    /// Returns a snapshot of the store's counters.
    ///
    /// `loads` and `load_errors` are left at zero; the owning group fills them.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        if let Some(lru) = inner.lru.as_ref() {
            stats.entries = lru.len();
            stats.used_bytes = lru.used_bytes();
        }
        stats.max_bytes = self.cache_bytes;
        stats.evictions = self.evictions.load(Ordering::Relaxed);
        stats
    }

    // == Length ==
    /// Returns the current number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().lru.as_ref().map_or(0, LruCache::len)
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn build_lru(&self) -> LruCache<ByteView> {
        debug!("Creating LRU cache with a budget of {} bytes", self.cache_bytes);
        let evictions = Arc::clone(&self.evictions);
        LruCache::with_on_evicted(self.cache_bytes, move |key, value: ByteView| {
            evictions.fetch_add(1, Ordering::Relaxed);
            debug!("Evicted key '{}' ({} bytes)", key, value.size());
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_store_new() {
        let store = CacheStore::new(0);
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_get_before_add_is_a_miss() {
        let store = CacheStore::new(0);

        assert!(store.get("key").is_none());
        assert!(store.inner.lock().lru.is_none());
        assert_eq!(store.stats().misses, 1);
    }

    #[test]
    fn test_store_add_and_get() {
        let store = CacheStore::new(0);
        store.add("key1", ByteView::from("value1"));

        let value = store.get("key1").unwrap();
        assert_eq!(value.to_string(), "value1");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_overwrite() {
        let store = CacheStore::new(0);
        store.add("key1", ByteView::from("value1"));
        store.add("key1", ByteView::from("v2"));

        assert_eq!(store.get("key1").unwrap().to_string(), "v2");
        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().used_bytes, 6);
    }

    #[test]
    fn test_store_lru_eviction() {
        let store = CacheStore::new(8);
        store.add("k1", ByteView::from("1"));
        store.add("k2", ByteView::from("2"));
        store.add("k3", ByteView::from("3"));

        assert_eq!(store.len(), 2);
        assert!(store.get("k1").is_none());
        assert!(store.get("k2").is_some());
        assert!(store.get("k3").is_some());
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_stats() {
        let store = CacheStore::new(1024);
        store.add("key1", ByteView::from("value1"));
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
        assert_eq!(stats.used_bytes, 10);
        assert_eq!(stats.max_bytes, 1024);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_store_concurrent_access() {
        let store = Arc::new(CacheStore::new(256));

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for i in 0..200 {
                        let key = format!("t{}-{}", t, i % 20);
                        if store.get(&key).is_none() {
                            store.add(key, ByteView::from(vec![t as u8; 8]));
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("worker panicked");
        }

        let stats = store.stats();
        assert!(stats.used_bytes <= 256);
        assert_eq!(stats.hits + stats.misses, 8 * 200);
    }
}
