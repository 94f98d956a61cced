//! Cache Statistics Module
//!
//! Tracks lookups, loads and evictions for a group's cache.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of a group's cache counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that found nothing cached
    pub misses: u64,
    /// Successful loader calls
    pub loads: u64,
    /// Loader calls that returned an error
    pub load_errors: u64,
    /// Entries evicted to stay within the byte budget
    pub evictions: u64,
    /// Current number of cached entries
    pub entries: usize,
    /// Bytes currently charged against the budget
    pub used_bytes: i64,
    /// Configured byte budget, 0 = unbounded
    pub max_bytes: i64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Calculates the cache hit rate.
    ///
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }
}
