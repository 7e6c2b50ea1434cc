//! LRU (Least Recently Used) cache over a fixed slot pool
//!
//! Three structures are kept consistent by every call: the slot pool that
//! owns the bytes, the recency list threaded through the slots, and the
//! index from key hash to slot. Both `set` and `get` are O(1) plus the hash
//! and a copy bounded by the block size.

use std::collections::HashMap;
use std::hash::BuildHasher;

use ahash::RandomState;
use tracing::{debug, trace, warn};

use crate::config::{CacheConfig, KeyMode};
use crate::error::Result;
use crate::list::RecencyList;
use crate::slot::SlotPool;
use crate::stats::CacheStats;

/// What a `set` call did to the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetAction {
    /// Empty value, nothing changed
    Skipped,
    /// The key was resident; its value was overwritten
    Updated,
    /// The key took a never-used slot
    Inserted,
    /// The key took over a resident entry's slot
    Evicted {
        /// Hash of the displaced key
        victim_hash: u64,
    },
}

/// Result of [`LruCache::set`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use = "truncation is only reported through the outcome"]
pub struct SetOutcome {
    /// How the entry was admitted
    pub action: SetAction,
    /// Number of value bytes stored
    pub stored: usize,
    /// True when the value was longer than the block size and cut short
    pub truncated: bool,
}

impl SetOutcome {
    fn skipped() -> Self {
        Self {
            action: SetAction::Skipped,
            stored: 0,
            truncated: false,
        }
    }
}

/// Fixed-capacity LRU cache of byte blocks.
///
/// Not internally synchronized. Use [`SharedCache`](crate::SharedCache) or an
/// outer lock for access from several threads.
pub struct LruCache<S = RandomState> {
    pool: SlotPool,
    list: RecencyList,
    index: HashMap<u64, usize, RandomState>,
    hasher: S,
    key_mode: KeyMode,
    stats: CacheStats,
}

impl LruCache<RandomState> {
    /// Create a cache of `capacity` slots with the default block size
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(CacheConfig::new(capacity))
    }

    /// Create a cache from a validated config
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        Self::with_config_and_hasher(config, RandomState::new())
    }
}

impl<S: BuildHasher> LruCache<S> {
    /// Create a cache that hashes keys with `hasher`
    pub fn with_config_and_hasher(config: CacheConfig, hasher: S) -> Result<Self> {
        config.validate()?;
        let pool = SlotPool::new(config.capacity, config.block_size)?;

        Ok(Self {
            pool,
            list: RecencyList::new(),
            index: HashMap::with_capacity_and_hasher(config.capacity, RandomState::new()),
            hasher,
            key_mode: config.key_mode,
            stats: CacheStats::new(),
        })
    }

    /// Store `value` under `key`, making it the most recently used entry.
    ///
    /// Values longer than the block size keep their first `block_size` bytes and
    /// report `truncated`. An empty value leaves the cache untouched.
    pub fn set<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K, value: &[u8]) -> SetOutcome {
        if value.is_empty() {
            self.stats.record_skip();
            return SetOutcome::skipped();
        }

        let key = key.as_ref();
        let hash = self.hasher.hash_one(key);

        let (idx, action) = match self.index.get(&hash) {
            Some(&idx) => {
                self.list.move_to_front(self.pool.slots_mut(), idx);
                if self.key_mode == KeyMode::Verified && self.pool.key(idx) != key {
                    // Same hash, different key: the resident entry gives up its slot.
                    debug!(hash, slot = idx, "hash collision, replacing entry");
                    self.stats.record_eviction();
                    (idx, SetAction::Evicted { victim_hash: hash })
                } else {
                    trace!(hash, slot = idx, "update");
                    self.stats.record_update();
                    (idx, SetAction::Updated)
                }
            }
            None => match self.pool.claim() {
                Some(idx) => {
                    self.index.insert(hash, idx);
                    self.list.push_front(self.pool.slots_mut(), idx);
                    trace!(hash, slot = idx, "insert");
                    self.stats.record_insert();
                    (idx, SetAction::Inserted)
                }
                None => {
                    let (idx, victim_hash) = self.recycle_tail(hash);
                    (idx, SetAction::Evicted { victim_hash })
                }
            },
        };

        let stored_key = match self.key_mode {
            KeyMode::Verified => Some(key),
            KeyMode::HashOnly => None,
        };
        let stored = self.pool.write(idx, hash, stored_key, value);
        let truncated = stored < value.len();
        if truncated {
            warn!(
                hash,
                len = value.len(),
                block_size = self.pool.block_size(),
                "value larger than block size, truncated"
            );
            self.stats.record_truncation();
        }

        SetOutcome {
            action,
            stored,
            truncated,
        }
    }

    /// Hand the least recently used slot to `hash`. Returns the slot and the
    /// hash it previously held.
    fn recycle_tail(&mut self, hash: u64) -> (usize, u64) {
        let Some(idx) = self.list.tail() else {
            unreachable!("full pool with an empty recency list");
        };

        let old_hash = self.pool.key_hash(idx);
        self.index.remove(&old_hash);
        self.list.unlink(self.pool.slots_mut(), idx);
        self.index.insert(hash, idx);
        self.list.push_front(self.pool.slots_mut(), idx);

        debug!(evicted = old_hash, hash, slot = idx, "evict");
        self.stats.record_eviction();
        (idx, old_hash)
    }

    /// Fetch the value for `key` and mark it most recently used.
    ///
    /// The returned slice borrows the cache, so it cannot outlive the next
    /// mutating call.
    pub fn get<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> Option<&[u8]> {
        let Some(idx) = self.lookup(key.as_ref()) else {
            trace!("miss");
            self.stats.record_miss();
            return None;
        };

        self.list.move_to_front(self.pool.slots_mut(), idx);
        trace!(slot = idx, "hit");
        self.stats.record_hit();
        Some(self.pool.bytes(idx))
    }

    /// Fetch the value for `key` without touching recency or stats
    pub fn peek<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<&[u8]> {
        self.lookup(key.as_ref()).map(|idx| self.pool.bytes(idx))
    }

    /// Check whether `key` is resident without touching recency or stats
    pub fn contains<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        self.lookup(key.as_ref()).is_some()
    }

    fn lookup(&self, key: &[u8]) -> Option<usize> {
        let hash = self.hasher.hash_one(key);
        let idx = *self.index.get(&hash)?;
        match self.key_mode {
            KeyMode::Verified if self.pool.key(idx) != key => None,
            _ => Some(idx),
        }
    }

    /// Resident entries as `(key_hash, value)`, most recently used first
    pub fn iter(&self) -> impl Iterator<Item = (u64, &[u8])> + '_ {
        self.list
            .iter(self.pool.slots())
            .map(move |idx| (self.pool.key_hash(idx), self.pool.bytes(idx)))
    }

    /// Number of resident entries
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// Number of slots in the pool
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Bytes per slot
    pub fn block_size(&self) -> usize {
        self.pool.block_size()
    }

    /// Key matching policy
    pub fn key_mode(&self) -> KeyMode {
        self.key_mode
    }

    /// Activity counters
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Zero the activity counters; entries are kept
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    #[cfg(test)]
    fn assert_consistent(&self) {
        let order: Vec<usize> = self.list.iter(self.pool.slots()).collect();
        assert_eq!(order.len(), self.list.len());
        assert_eq!(order.len(), self.index.len());
        assert_eq!(order.len(), self.pool.in_use());
        assert_eq!(self.list.head(), order.first().copied());
        assert_eq!(self.list.tail(), order.last().copied());

        for (&hash, &idx) in &self.index {
            assert_eq!(self.pool.key_hash(idx), hash);
            assert!(order.contains(&idx));
        }
        for pair in order.windows(2) {
            assert_eq!(self.pool.slots()[pair[1]].prev, Some(pair[0]));
        }
    }
}
