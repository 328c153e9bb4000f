//! Sharded concurrent accumulator used during parallel ranking and
//! removal.
//!
//! A [`ConcurrentMap`] is a fixed number of independently-locked shards;
//! a key belongs to exactly one shard (`key mod N`), so writers to
//! different keys never contend and worst-case contention is bounded by
//! same-shard collisions. The shard count is decided at construction,
//! independent of corpus size, and is usually matched to the worker pool
//! size.
//!
//! [`ConcurrentMap::slot`] returns a scoped, exclusively-held guard for
//! one key's value, so read-modify-write accumulation needs no separate
//! read-then-write. [`ConcurrentMap::snapshot`] drains every shard into
//! one ordinary ascending map, which is done once at the end of a
//! parallel pass.
//!
//! # Examples
//!
//! ```
//! use sagitta::concurrent::ConcurrentMap;
//!
//! let map: ConcurrentMap<f64> = ConcurrentMap::new(4);
//! *map.slot(7) += 0.5;
//! *map.slot(7) += 0.25;
//! *map.slot(3) += 1.0;
//! map.erase(3);
//!
//! let snapshot = map.snapshot();
//! assert_eq!(snapshot.get(&7), Some(&0.75));
//! assert!(!snapshot.contains_key(&3));
//! ```

use std::collections::BTreeMap;

use parking_lot::{MappedMutexGuard, Mutex, MutexGuard};

use crate::index::document::DocumentId;

/// A mapping split into independently-locked shards.
pub struct ConcurrentMap<V> {
    shards: Vec<Mutex<BTreeMap<DocumentId, V>>>,
}

impl<V: Default> ConcurrentMap<V> {
    /// Create a map with `shard_count` lock domains (at least one).
    pub fn new(shard_count: usize) -> Self {
        let shard_count = shard_count.max(1);
        ConcurrentMap {
            shards: (0..shard_count).map(|_| Mutex::new(BTreeMap::new())).collect(),
        }
    }

    fn shard_for(&self, key: DocumentId) -> &Mutex<BTreeMap<DocumentId, V>> {
        let index = (key as u64 % self.shards.len() as u64) as usize;
        &self.shards[index]
    }

    /// Exclusive scoped access to the value under `key`.
    ///
    /// The owning shard stays locked until the returned guard is
    /// dropped; the value is default-initialized if absent.
    pub fn slot(&self, key: DocumentId) -> MappedMutexGuard<'_, V> {
        let guard = self.shard_for(key).lock();
        MutexGuard::map(guard, |shard| shard.entry(key).or_default())
    }

    /// Remove the entry under `key`, if present.
    ///
    /// Locks only the owning shard.
    pub fn erase(&self, key: DocumentId) {
        self.shard_for(key).lock().remove(&key);
    }

    /// Drain every shard into one ordinary ascending map.
    ///
    /// Shards are locked one at a time; entries are moved out, leaving
    /// the map empty.
    pub fn snapshot(&self) -> BTreeMap<DocumentId, V> {
        let mut result = BTreeMap::new();
        for shard in &self.shards {
            result.append(&mut shard.lock());
        }
        result
    }

    /// Number of independent lock domains.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }
}
