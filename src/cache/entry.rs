//! Cache Entry Module
//!
//! Defines the recency-list node holding one key/value pair, plus the
//! `Sizeable` capability every stored value must provide.

// == Sizeable ==
/// Reports the memory footprint of a cached value in bytes.
///
/// The eviction engine charges `key.len() + value.size()` against its budget
/// and does not otherwise look at the value.
pub trait Sizeable {
    fn size(&self) -> usize;
}

impl Sizeable for String {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Sizeable for &'static str {
    fn size(&self) -> usize {
        self.len()
    }
}

impl Sizeable for Vec<u8> {
    fn size(&self) -> usize {
        self.len()
    }
}

/// Null link in the recency list.
pub(crate) const NIL: usize = usize::MAX;

// == Cache Entry ==
/// A key/value pair stored in the arena-backed recency list.
///
/// `value` is `None` only while the slot sits on the free list.
#[derive(Debug)]
pub(crate) struct CacheEntry<V> {
    pub key: String,
    pub value: Option<V>,
    /// Towards the most recently used end
    pub prev: usize,
    /// Towards the least recently used end
    pub next: usize,
}

impl<V: Sizeable> CacheEntry<V> {
    // == Constructor ==
    /// Creates an unlinked entry.
    pub fn new(key: String, value: V) -> Self {
        Self {
            key,
            value: Some(value),
            prev: NIL,
            next: NIL,
        }
    }

    // == Charge ==
    /// Bytes this entry counts against the budget.
    pub fn charge(&self) -> i64 {
        let value_size = self.value.as_ref().map_or(0, |v| v.size());
        (self.key.len() + value_size) as i64
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_creation_is_unlinked() {
        let entry = CacheEntry::new("key".to_string(), "value".to_string());

        assert_eq!(entry.key, "key");
        assert_eq!(entry.value.as_deref(), Some("value"));
        assert_eq!(entry.prev, NIL);
        assert_eq!(entry.next, NIL);
    }

    #[test]
    fn test_entry_charge_counts_key_and_value() {
        let entry = CacheEntry::new("k1".to_string(), vec![0u8; 10]);
        assert_eq!(entry.charge(), 12);
    }

    #[test]
    fn test_entry_charge_of_vacated_slot() {
        let mut entry = CacheEntry::new("abc".to_string(), "xyz");
        entry.value = None;
        assert_eq!(entry.charge(), 3);
    }

    #[test]
    fn test_sizeable_impls() {
        assert_eq!("hello".size(), 5);
        assert_eq!(String::from("héllo").size(), 6);
        assert_eq!(vec![1u8, 2, 3].size(), 3);
    }
}
