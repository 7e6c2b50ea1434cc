//! Cache configuration

use crate::error::{Error, Result};

/// Smallest accepted block size. Below this the per-slot bookkeeping outweighs the payload.
pub const MIN_BLOCK_SIZE: usize = 50;

/// Largest accepted block size (1 MiB)
pub const MAX_BLOCK_SIZE: usize = 1024 * 1024;

/// Block size used when none is configured (100 KiB)
pub const DEFAULT_BLOCK_SIZE: usize = 100 * 1024;

/// How keys are matched against resident entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyMode {
    /// Entries are identified by key hash alone. Two keys with the same hash
    /// share one entry.
    #[default]
    HashOnly,

    /// The key bytes are kept in the slot and compared on lookup. A key whose
    /// hash matches a resident entry with a different key misses on `get`, and
    /// on `set` takes over that entry's slot.
    Verified,
}

/// Construction parameters for [`LruCache`](crate::LruCache)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of slots in the pool
    pub capacity: usize,

    /// Bytes per slot; longer values are truncated
    pub block_size: usize,

    /// Key matching policy
    pub key_mode: KeyMode,
}

impl CacheConfig {
    /// Config for `capacity` slots of [`DEFAULT_BLOCK_SIZE`] bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            block_size: DEFAULT_BLOCK_SIZE,
            key_mode: KeyMode::default(),
        }
    }

    /// Set the per-slot block size
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the key matching policy
    pub fn with_key_mode(mut self, key_mode: KeyMode) -> Self {
        self.key_mode = key_mode;
        self
    }

    /// Check the parameters without allocating anything
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(Error::InvalidCapacity(self.capacity));
        }
        if !(MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE).contains(&self.block_size) {
            return Err(Error::InvalidBlockSize(self.block_size));
        }
        Ok(())
    }
}
