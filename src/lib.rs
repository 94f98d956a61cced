//! Group Cache - An in-process, namespaced byte cache
//!
//! Loads values through a caller-supplied loader on miss and keeps them in a
//! byte-budgeted LRU cache.

pub mod cache;
pub mod config;
pub mod error;
pub mod group;

pub use cache::{ByteView, CacheStats, CacheStore, LruCache, Sizeable};
pub use config::Config;
pub use error::{CacheError, Result};
pub use group::{Group, GroupBuilder, Loader, Registry};
