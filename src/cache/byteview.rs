//! Byte View Module
//!
//! Immutable byte value stored in a group's cache.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::cache::Sizeable;

// == Byte View ==
/// Read-only view over cached bytes.
///
/// Clones share one immutable buffer. Bytes only leave the view as a shared
/// borrow or as an owned copy, so a caller can never change what is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ByteView {
    bytes: Arc<[u8]>,
}

impl ByteView {
    // == Constructor ==
    /// Creates a view holding its own copy of `bytes`.
    pub fn copy_from(bytes: &[u8]) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }

    // == Byte Slice ==
    /// Returns a fresh copy of the bytes.
    pub fn byte_slice(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Borrows the bytes without copying.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Decodes the bytes as UTF-8, replacing invalid sequences.
    pub fn as_str_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl Default for ByteView {
    fn default() -> Self {
        Self::copy_from(&[])
    }
}

impl Sizeable for ByteView {
    fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Display for ByteView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str_lossy())
    }
}

impl From<Vec<u8>> for ByteView {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Arc::from(bytes),
        }
    }
}

impl From<&[u8]> for ByteView {
    fn from(bytes: &[u8]) -> Self {
        Self::copy_from(bytes)
    }
}

impl From<String> for ByteView {
    fn from(value: String) -> Self {
        Self::from(value.into_bytes())
    }
}

impl From<&str> for ByteView {
    fn from(value: &str) -> Self {
        Self::copy_from(value.as_bytes())
    }
}
