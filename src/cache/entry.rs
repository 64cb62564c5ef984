//! Cache Entry Module
//!
//! Defines the node stored for each key in the recency list.

// == Cache Entry ==
/// A single cache entry with its value and recency metadata.
#[derive(Debug, Clone)]
pub(crate) struct Entry<K, V> {
    /// The key, kept so eviction can clean up the index
    pub key: K,
    /// The stored value
    pub value: V,
    /// Logical access sequence number; larger means more recently used
    pub recency: u64,
    /// Slot of the next more-recent entry
    pub(crate) newer: Option<usize>,
    /// Slot of the next less-recent entry
    pub(crate) older: Option<usize>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    /// Creates an unlinked entry with the given recency marker.
    pub fn new(key: K, value: V, recency: u64) -> Self {
        Self {
            key,
            value,
            recency,
            newer: None,
            older: None,
        }
    }

    // == Is Linked ==
    /// Returns true if the entry has a neighbour in either direction.
    pub(crate) fn is_linked(&self) -> bool {
        self.newer.is_some() || self.older.is_some()
    }
}
