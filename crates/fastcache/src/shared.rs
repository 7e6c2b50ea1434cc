//! Lock-guarded cache for use from several threads

use ahash::RandomState;
use parking_lot::Mutex;

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::lru::{LruCache, SetOutcome};
use crate::stats::CacheStats;

/// [`LruCache`] split into independently locked shards.
///
/// Each key always maps to the same shard, and recency is tracked per shard.
/// Shard capacities add up to the configured capacity.
pub struct SharedCache {
    shards: Box<[Mutex<LruCache>]>,
    router: RandomState,
    capacity: usize,
}

impl SharedCache {
    /// Single-lock cache
    pub fn new(config: CacheConfig) -> Result<Self> {
        Self::with_shards(config, 1)
    }

    /// Cache split into `shards` locks
    ///
    /// # Arguments
    /// * `config` - Total capacity, block size, and key mode
    /// * `shards` - Number of shards, between 1 and `config.capacity`
    pub fn with_shards(config: CacheConfig, shards: usize) -> Result<Self> {
        config.validate()?;
        let capacity = config.capacity;
        if shards == 0 || shards > capacity {
            return Err(Error::InvalidShardCount { shards, capacity });
        }

        let base = capacity / shards;
        let extra = capacity % shards;
        let shards = (0..shards)
            .map(|i| {
                let shard_config = CacheConfig {
                    capacity: base + usize::from(i < extra),
                    ..config.clone()
                };
                LruCache::with_config(shard_config).map(Mutex::new)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            shards: shards.into_boxed_slice(),
            router: RandomState::new(),
            capacity,
        })
    }

    fn shard(&self, key: &[u8]) -> &Mutex<LruCache> {
        if self.shards.len() == 1 {
            return &self.shards[0];
        }
        let hash = self.router.hash_one(key);
        &self.shards[(hash % self.shards.len() as u64) as usize]
    }

    /// Store `value` under `key`; see [`LruCache::set`]
    pub fn set<K: AsRef<[u8]> + ?Sized>(&self, key: &K, value: &[u8]) -> SetOutcome {
        self.shard(key.as_ref()).lock().set(key, value)
    }

    /// Copy out the value for `key`, marking it most recently used
    pub fn get<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> Option<Vec<u8>> {
        self.with_value(key, <[u8]>::to_vec)
    }

    /// Run `f` on the value for `key` while its shard is locked
    pub fn with_value<K, F, R>(&self, key: &K, f: F) -> Option<R>
    where
        K: AsRef<[u8]> + ?Sized,
        F: FnOnce(&[u8]) -> R,
    {
        self.shard(key.as_ref()).lock().get(key).map(f)
    }

    /// Check whether `key` is resident without touching recency
    pub fn contains<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        self.shard(key.as_ref()).lock().contains(key)
    }

    /// Number of resident entries across all shards
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.lock().len()).sum()
    }

    /// Check if no shard holds an entry
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|s| s.lock().is_empty())
    }

    /// Total slot capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of shards
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// Counters summed over all shards
    pub fn stats(&self) -> CacheStats {
        let mut total = CacheStats::new();
        for shard in self.shards.iter() {
            total.merge(shard.lock().stats());
        }
        total
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn config(capacity: usize) -> CacheConfig {
        CacheConfig::new(capacity).with_block_size(64)
    }

    #[test]
    fn test_shared_basic() {
        let cache = SharedCache::new(config(2)).unwrap();

        let _ = cache.set("a", b"1");
        assert_eq!(cache.get("a"), Some(b"1".to_vec()));
        assert_eq!(cache.get("b"), None);
        assert_eq!(cache.with_value("a", |v| v.len()), Some(1));
        assert_eq!(cache.shard_count(), 1);
        assert_eq!(cache.stats().hits(), 2);
    }

    #[test]
    fn test_single_shard_is_lru() {
        let cache = SharedCache::new(config(2)).unwrap();

        let _ = cache.set("a", b"1");
        let _ = cache.set("b", b"2");
        cache.get("a");
        let _ = cache.set("c", b"3");

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_shard_capacity_split() {
        let cache = SharedCache::with_shards(config(10), 4).unwrap();
        let capacities: Vec<usize> = cache.shards.iter().map(|s| s.lock().capacity()).collect();

        assert_eq!(capacities, vec![3, 3, 2, 2]);
        assert_eq!(cache.capacity(), 10);
    }

    #[test]
    fn test_invalid_shard_count() {
        assert!(matches!(
            SharedCache::with_shards(config(4), 0),
            Err(Error::InvalidShardCount { shards: 0, .. })
        ));
        assert!(matches!(
            SharedCache::with_shards(config(4), 5),
            Err(Error::InvalidShardCount { shards: 5, capacity: 4 })
        ));
    }

    #[test]
    fn test_sharded_capacity_bound() {
        let cache = SharedCache::with_shards(config(8), 4).unwrap();
        for i in 0..200 {
            let _ = cache.set(&format!("key{}", i), b"v");
        }
        assert!(cache.len() <= 8);
        assert_eq!(cache.stats().inserts() + cache.stats().evictions(), 200);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(SharedCache::with_shards(config(64), 4).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..100 {
                        let key = format!("t{}-{}", t, i);
                        let _ = cache.set(&key, key.as_bytes());
                        if let Some(value) = cache.get(&key) {
                            assert_eq!(value, key.as_bytes());
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(cache.len() <= 64);
        assert!(!cache.is_empty());
    }
}
