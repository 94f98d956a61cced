//! LRU Eviction Engine
//!
//! Byte-budgeted Least Recently Used store.
//!
//! Entries live in a `Vec` arena linked into a doubly linked recency list by
//! index, with a `HashMap` from key to arena slot. Every operation is O(1)
//! amortized. The engine is not synchronized; wrap it (see `CacheStore`) for
//! shared use.

use std::collections::HashMap;
use std::fmt;

use crate::cache::entry::{CacheEntry, Sizeable, NIL};

/// Callback invoked with each evicted key and value.
pub type OnEvicted<V> = Box<dyn FnMut(String, V) + Send>;

// == LRU Cache ==
/// Bounded key/value store ordered by recency.
///
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// `used_bytes` is always the sum of `key.len() + value.size()` over the live
/// entries. After every `add`, entries are evicted from the tail until
/// `used_bytes <= max_bytes`, unless `max_bytes` is 0 (unbounded).
pub struct LruCache<V> {
    /// Byte budget, 0 = unbounded
    max_bytes: i64,
    /// Bytes charged by live entries
    used_bytes: i64,
    /// Key to arena slot
    map: HashMap<String, usize>,
    arena: Vec<CacheEntry<V>>,
    /// Vacated arena slots
    free: Vec<usize>,
    head: usize,
    tail: usize,
    on_evicted: Option<OnEvicted<V>>,
}

impl<V> fmt::Debug for LruCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("max_bytes", &self.max_bytes)
            .field("used_bytes", &self.used_bytes)
            .field("len", &self.map.len())
            .field("on_evicted", &self.on_evicted.is_some())
            .finish()
    }
}

impl<V: Sizeable> LruCache<V> {
    // == Constructors ==
    /// Creates an empty cache with the given byte budget (0 = unbounded).
    pub fn new(max_bytes: i64) -> Self {
        Self {
            max_bytes,
            used_bytes: 0,
            map: HashMap::new(),
            arena: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            on_evicted: None,
        }
    }

    /// Creates an empty cache that reports every eviction to `on_evicted`.
    ///
    /// The callback runs after the entry is fully removed, once per entry.
    pub fn with_on_evicted<F>(max_bytes: i64, on_evicted: F) -> Self
    where
        F: FnMut(String, V) + Send + 'static,
    {
        let mut cache = Self::new(max_bytes);
        cache.on_evicted = Some(Box::new(on_evicted));
        cache
    }

    // == Get ==
    /// Looks up a key, promoting it to most recently used on a hit.
    pub fn get(&mut self, key: &str) -> Option<&V> {
        let idx = *self.map.get(key)?;
        self.move_to_front(idx);
        self.arena[idx].value.as_ref()
    }

    // == Add ==
    /// Inserts or replaces a value, then evicts until the budget holds.
    ///
    /// Replacing keeps a single entry, adjusts `used_bytes` by the size delta
    /// and promotes the entry. The replaced value is dropped without invoking
    /// the eviction callback.
    pub fn add(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();

        if let Some(&idx) = self.map.get(&key) {
            let new_size = value.size() as i64;
            let old_size = self.arena[idx]
                .value
                .replace(value)
                .map_or(0, |old| old.size() as i64);
            self.used_bytes += new_size - old_size;
            self.move_to_front(idx);
        } else {
            let entry = CacheEntry::new(key.clone(), value);
            self.used_bytes += entry.charge();
            let idx = self.alloc(entry);
            self.push_front(idx);
            self.map.insert(key, idx);
        }

        while self.max_bytes != 0 && self.used_bytes > self.max_bytes && !self.map.is_empty() {
            self.remove_oldest();
        }
    }

    // == Remove Oldest ==
    /// Evicts the least recently used entry, if any.
    ///
    /// No-op on an empty cache; the callback is not invoked in that case.
    pub fn remove_oldest(&mut self) {
        if self.tail == NIL {
            return;
        }

        let (key, value) = self.detach(self.tail);
        if let Some(on_evicted) = self.on_evicted.as_mut() {
            on_evicted(key, value);
        }
    }

    // == Remove ==
    /// Removes a key explicitly and hands its value back to the caller.
    ///
    /// This is not an eviction, so the callback is not invoked.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = *self.map.get(key)?;
        let (_, value) = self.detach(idx);
        Some(value)
    }

    // == Peek Oldest ==
    /// Returns the least recently used key without touching recency.
    pub fn peek_oldest(&self) -> Option<&str> {
        (self.tail != NIL).then(|| self.arena[self.tail].key.as_str())
    }

    // == Contains ==
    /// Checks for a key without touching recency.
    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    // == Keys ==
    /// Iterates keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        let mut cursor = self.head;
        std::iter::from_fn(move || {
            if cursor == NIL {
                return None;
            }
            let entry = &self.arena[cursor];
            cursor = entry.next;
            Some(entry.key.as_str())
        })
    }

    // == Length ==
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Bytes currently charged against the budget.
    pub fn used_bytes(&self) -> i64 {
        self.used_bytes
    }

    /// Configured budget, 0 = unbounded.
    pub fn max_bytes(&self) -> i64 {
        self.max_bytes
    }

    // == List Plumbing ==

    /// Unlinks a live slot, drops it from the map and frees the slot.
    fn detach(&mut self, idx: usize) -> (String, V) {
        self.unlink(idx);
        self.used_bytes -= self.arena[idx].charge();

        let entry = &mut self.arena[idx];
        let key = std::mem::take(&mut entry.key);
        // Linked slots always hold Some; only freed slots are None
        let value = entry
            .value
            .take()
            .unwrap_or_else(|| unreachable!("linked slot {idx} has no value"));

        self.map.remove(&key);
        self.free.push(idx);
        (key, value)
    }

    fn alloc(&mut self, entry: CacheEntry<V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.arena[idx] = entry;
                idx
            }
            None => {
                self.arena.push(entry);
                self.arena.len() - 1
            }
        }
    }

    fn push_front(&mut self, idx: usize) {
        self.arena[idx].prev = NIL;
        self.arena[idx].next = self.head;
        if self.head != NIL {
            self.arena[self.head].prev = idx;
        }
        self.head = idx;
        if self.tail == NIL {
            self.tail = idx;
        }
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = (self.arena[idx].prev, self.arena[idx].next);
        if prev != NIL {
            self.arena[prev].next = next;
        } else {
            self.head = next;
        }
        if next != NIL {
            self.arena[next].prev = prev;
        } else {
            self.tail = prev;
        }
        self.arena[idx].prev = NIL;
        self.arena[idx].next = NIL;
    }

    fn move_to_front(&mut self, idx: usize) {
        if self.head != idx {
            self.unlink(idx);
            self.push_front(idx);
        }
    }
}
