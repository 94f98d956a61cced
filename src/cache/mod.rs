//! Cache Module
//!
//! Byte-budgeted LRU eviction engine and the thread-safe store built on it.

mod byteview;
mod entry;
mod lru;
mod stats;
mod store;


// Re-export public types
pub use byteview::ByteView;
pub use entry::Sizeable;
pub use lru::{LruCache, OnEvicted};
pub use stats::CacheStats;
pub use store::CacheStore;
