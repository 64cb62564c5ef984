//! LRU Recency List Module
//!
//! Implements the access-ordered list used for O(1) LRU eviction.

use crate::cache::Entry;

// == Recency List ==
/// Doubly linked list of entries ordered by access recency.
///
/// Entries live in a slab of slots addressed by index, so the store's hash
/// index can point straight at a node:
/// - `newest` = Most recently used
/// - `oldest` = Least recently used
///
/// Every link or touch stamps the entry with the next value of a logical
/// counter, so recency markers strictly increase from `oldest` to `newest`.
#[derive(Debug)]
pub(crate) struct RecencyList<K, V> {
    /// Entry storage; `None` marks a free slot
    slots: Vec<Option<Entry<K, V>>>,
    /// Free slot indices available for reuse
    free: Vec<usize>,
    /// Most recently used slot
    newest: Option<usize>,
    /// Least recently used slot
    oldest: Option<usize>,
    /// Number of live entries
    len: usize,
    /// Next recency marker to hand out
    sequence: u64,
}

impl<K, V> Default for RecencyList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> RecencyList<K, V> {
    // == Constructor ==
    /// Creates a new empty recency list.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            newest: None,
            oldest: None,
            len: 0,
            sequence: 0,
        }
    }

    // == Push Newest ==
    /// Inserts a new entry at the most-recent end and returns its slot.
    pub fn push_newest(&mut self, key: K, value: V) -> usize {
        let recency = self.next_recency();
        let entry = Entry::new(key, value, recency);

        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(entry);
                slot
            }
            None => {
                self.slots.push(Some(entry));
                self.slots.len() - 1
            }
        };

        self.link_newest(slot);
        self.len += 1;
        slot
    }

    // == Touch ==
    /// Marks the entry in `slot` as most recently used.
    ///
    /// Unknown or free slots are ignored.
    pub fn touch(&mut self, slot: usize) {
        if self.get(slot).is_none() {
            return;
        }

        if self.newest != Some(slot) {
            self.unlink(slot);
            self.link_newest(slot);
        }

        let recency = self.next_recency();
        if let Some(entry) = self.get_mut(slot) {
            entry.recency = recency;
        }
    }

    // == Remove ==
    /// Unlinks and returns the entry in `slot`, freeing the slot.
    pub fn remove(&mut self, slot: usize) -> Option<Entry<K, V>> {
        self.get(slot)?;
        self.unlink(slot);

        let entry = self.slots.get_mut(slot)?.take()?;
        self.free.push(slot);
        self.len -= 1;

        debug_assert!(!entry.is_linked());
        Some(entry)
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn pop_oldest(&mut self) -> Option<Entry<K, V>> {
        let slot = self.oldest?;
        self.remove(slot)
    }

    // == Peek Oldest ==
    /// Returns the least recently used entry without removing it.
    #[allow(dead_code)]
    pub fn peek_oldest(&self) -> Option<&Entry<K, V>> {
        self.oldest.and_then(|slot| self.get(slot))
    }

    // == Slot Access ==
    pub fn get(&self, slot: usize) -> Option<&Entry<K, V>> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut Entry<K, V>> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    // == Length ==
    /// Returns the number of live entries.
    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every entry. The recency counter keeps counting.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.newest = None;
        self.oldest = None;
        self.len = 0;
    }

    // == Iter ==
    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.newest,
        }
    }

    fn next_recency(&mut self) -> u64 {
        let recency = self.sequence;
        self.sequence += 1;
        recency
    }

    /// Detaches `slot` from its neighbours and patches the ends.
    fn unlink(&mut self, slot: usize) {
        let (newer, older) = match self.get_mut(slot) {
            Some(entry) => (entry.newer.take(), entry.older.take()),
            None => return,
        };

        match newer {
            Some(n) => {
                if let Some(entry) = self.get_mut(n) {
                    entry.older = older;
                }
            }
            None => self.newest = older,
        }

        match older {
            Some(o) => {
                if let Some(entry) = self.get_mut(o) {
                    entry.newer = newer;
                }
            }
            None => self.oldest = newer,
        }
    }

    /// Attaches an unlinked `slot` at the most-recent end.
    fn link_newest(&mut self, slot: usize) {
        let previous = self.newest;

        if let Some(entry) = self.get_mut(slot) {
            entry.newer = None;
            entry.older = previous;
        }

        match previous {
            Some(p) => {
                if let Some(entry) = self.get_mut(p) {
                    entry.newer = Some(slot);
                }
            }
            None => self.oldest = Some(slot),
        }

        self.newest = Some(slot);
    }
}

// == Iterator ==
/// Iterator over entries, most recently used first.
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: Option<usize>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = &'a Entry<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.get(self.cursor?)?;
        self.cursor = entry.older;
        Some(entry)
    }
}
