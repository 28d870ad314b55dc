//! Cache Store Module
//!
//! Byte-capacity bounded storage: a HashMap of entries plus insertion-order
//! tracking that drives eviction when a new entry needs room.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};

// == Cache Store ==
/// In-memory store bounded by total payload size.
///
/// Eviction is purely capacity-driven and oldest-inserted-first; access
/// never promotes an entry. Expiry is the caller's concern: `get` returns
/// whatever is stored, expired or not.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-entry storage
    entries: HashMap<String, CacheEntry>,
    /// Insertion-order tracker (eviction order)
    order: InsertionOrder,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum total payload bytes, None = unbounded
    capacity: Option<u64>,
    /// Running total of stored payload bytes
    used_bytes: u64,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore.
    ///
    /// # Arguments
    /// * `capacity` - Maximum total payload bytes, or None for unbounded
    pub fn new(capacity: Option<u64>) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            capacity,
            used_bytes: 0,
        }
    }

    // == Get ==
    /// Returns the entry for a key if one is stored, expired or not.
    pub fn get(&mut self, key: &str) -> Option<&CacheEntry> {
        if self.entries.contains_key(key) {
            self.stats.record_hit();
        } else {
            self.stats.record_miss();
        }
        self.entries.get(key)
    }

    // == Put ==
    /// Stores an entry, replacing any existing entry under the same key.
    ///
    /// Evicts oldest-inserted entries until the new payload fits. If it
    /// still cannot fit after the store is emptied, the entry is not stored
    /// and `false` is returned; capacity is never exceeded to make room.
    pub fn put(&mut self, key: String, entry: CacheEntry) -> bool {
        self.remove(&key);

        let needed = entry.size();
        if !self.make_room(needed) {
            debug!(key = %key, size = needed, "entry does not fit in cache, dropped");
            return false;
        }

        self.used_bytes += needed;
        self.order.record(&key);
        self.entries.insert(key, entry);
        true
    }

    // == Remove ==
    /// Removes an entry by key, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<CacheEntry> {
        let entry = self.entries.remove(key)?;
        self.order.remove(key);
        self.used_bytes -= entry.size();
        Some(entry)
    }

    // == Make Room ==
    /// Evicts oldest-inserted entries until `needed` more bytes fit.
    ///
    /// Returns whether enough room exists afterwards. A no-op when capacity
    /// is unbounded.
    fn make_room(&mut self, needed: u64) -> bool {
        let Some(capacity) = self.capacity else {
            return true;
        };

        while self.used_bytes + needed > capacity {
            let Some(oldest) = self.order.pop_oldest() else {
                break;
            };
            if let Some(evicted) = self.entries.remove(&oldest) {
                self.used_bytes -= evicted.size();
                self.stats.record_eviction();
                debug!(key = %oldest, size = evicted.size(), "evicted to make room");
            }
        }

        self.used_bytes + needed <= capacity
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.entries = self.entries.len();
        stats.used_bytes = self.used_bytes;
        stats
    }

    // == Used Bytes ==
    /// Current total payload size of all stored entries.
    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
