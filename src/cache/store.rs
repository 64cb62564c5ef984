//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the LRU recency list.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use parking_lot::Mutex;
use tracing::debug;

use crate::cache::{CacheStats, RecencyList};
use crate::error::{Error, Result};

// == Cache Store ==
/// Bounded key-value store with least-recently-used eviction.
///
/// All state sits behind one mutex, so a store can be shared through an
/// `Arc` and every operation is linearizable.
///
/// ```
/// use recency_gate::CacheStore;
///
/// let cache = CacheStore::new(2);
/// cache.put(1, "A");
/// cache.put(2, "B");
/// assert_eq!(cache.get(&1), Some("A"));
/// cache.put(3, "C"); // evicts 2
/// assert_eq!(cache.get(&2), None);
/// ```
#[derive(Debug)]
pub struct CacheStore<K, V> {
    inner: Mutex<Inner<K, V>>,
    /// Maximum number of entries allowed
    capacity: usize,
}

#[derive(Debug)]
struct Inner<K, V> {
    /// Key to recency-list slot
    index: HashMap<K, usize>,
    /// Entries in access order
    lru: RecencyList<K, V>,
    /// Usage counters
    stats: CacheStats,
}

impl<K, V> CacheStore<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    // == Constructor ==
    /// Creates an empty store holding at most `capacity` entries.
    ///
    /// A capacity of 0 is legal: every `put` is evicted immediately.
    pub fn new(capacity: usize) -> Self {
        debug!(capacity, "cache store created");
        Self {
            inner: Mutex::new(Inner {
                index: HashMap::new(),
                lru: RecencyList::new(),
                stats: CacheStats::new(capacity),
            }),
            capacity,
        }
    }

    // == Checked Constructor ==
    /// Creates a store from a signed capacity, as read from external input.
    ///
    /// # Errors
    /// `Error::InvalidArgument` if `capacity` is negative or does not fit in
    /// `usize`.
    pub fn try_new(capacity: i64) -> Result<Self> {
        if capacity < 0 {
            return Err(Error::InvalidArgument(format!(
                "cache capacity must be >= 0, got {}",
                capacity
            )));
        }
        let capacity = usize::try_from(capacity).map_err(|_| {
            Error::InvalidArgument(format!("cache capacity {} is too large", capacity))
        })?;
        Ok(Self::new(capacity))
    }

    // == Get ==
    /// Returns a clone of the value for `key`, marking it most recently used.
    ///
    /// A miss leaves every entry untouched.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        let inner = &mut *inner;

        match inner.index.get(key).copied() {
            Some(slot) => {
                inner.lru.touch(slot);
                inner.stats.record_hit();
                inner.lru.get(slot).map(|entry| entry.value.clone())
            }
            None => {
                inner.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Inserts or overwrites `key`, marking it most recently used.
    ///
    /// If the insertion pushes the size over capacity, the least recently
    /// used entry is evicted. At most one eviction happens per call.
    pub fn put(&self, key: K, value: V) {
        let mut inner = self.inner.lock();
        let inner = &mut *inner;

        if let Some(&slot) = inner.index.get(&key) {
            if let Some(entry) = inner.lru.get_mut(slot) {
                entry.value = value;
            }
            inner.lru.touch(slot);
            return;
        }

        let slot = inner.lru.push_newest(key.clone(), value);
        inner.index.insert(key, slot);

        if inner.index.len() > self.capacity {
            if let Some(evicted) = inner.lru.pop_oldest() {
                inner.index.remove(&evicted.key);
                inner.stats.record_eviction();
                debug!(
                    recency = evicted.recency,
                    size = inner.index.len(),
                    "evicted least recently used entry"
                );
            }
        }
    }

    // == Delete ==
    /// Removes `key`. Returns false if it was not present.
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut inner = self.inner.lock();
        let inner = &mut *inner;

        match inner.index.remove(key) {
            Some(slot) => inner.lru.remove(slot).is_some(),
            None => false,
        }
    }

    // == Contains ==
    /// Checks whether `key` is cached without refreshing its recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().index.contains_key(key)
    }

    // == Keys ==
    /// Returns all keys, most recently used first.
    pub fn keys(&self) -> Vec<K> {
        self.inner.lock().lru.iter().map(|e| e.key.clone()).collect()
    }

    // == Clear ==
    /// Removes every entry. Counters are kept.
    pub fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.index.clear();
        inner.lru.clear();
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.total_entries = inner.index.len();
        stats
    }

    // == Length ==
    /// Returns the current number of entries; never exceeds `capacity()`.
    pub fn len(&self) -> usize {
        self.inner.lock().index.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // == Capacity ==
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
