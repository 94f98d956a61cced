//! Error types for the group cache
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for group lookups and construction.
///
/// The eviction engine and the cache store never fail; only a group's miss
/// path and its builder produce errors.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid caller input, such as an empty key
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The loader failed; its error is passed through unchanged
    #[error(transparent)]
    Loader(#[from] anyhow::Error),

    /// A group was built without a loader
    #[error("Group '{0}' has no loader configured")]
    MissingLoader(String),
}

// == Result Type Alias ==
/// Convenience Result type for the group cache.
pub type Result<T> = std::result::Result<T, CacheError>;
