//! Cache statistics tracking

/// Counters for cache activity.
///
/// Updated by `set` and `get`; `peek` and `contains` are not counted.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    hits: u64,
    misses: u64,
    inserts: u64,
    updates: u64,
    evictions: u64,
    truncations: u64,
    skipped: u64,
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) fn record_insert(&mut self) {
        self.inserts += 1;
    }

    pub(crate) fn record_update(&mut self) {
        self.updates += 1;
    }

    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub(crate) fn record_truncation(&mut self) {
        self.truncations += 1;
    }

    pub(crate) fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// `get` calls that found their key
    pub fn hits(&self) -> u64 {
        self.hits
    }

    /// `get` calls that found nothing
    pub fn misses(&self) -> u64 {
        self.misses
    }

    /// New keys admitted into a never-used slot
    pub fn inserts(&self) -> u64 {
        self.inserts
    }

    /// Values overwritten for a resident key
    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Resident entries displaced by a new key
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Values cut down to the block size
    pub fn truncations(&self) -> u64 {
        self.truncations
    }

    /// `set` calls ignored because the value was empty
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Add another tracker's counters into this one
    pub fn merge(&mut self, other: &CacheStats) {
        self.hits += other.hits;
        self.misses += other.misses;
        self.inserts += other.inserts;
        self.updates += other.updates;
        self.evictions += other.evictions;
        self.truncations += other.truncations;
        self.skipped += other.skipped;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
