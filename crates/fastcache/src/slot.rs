//! Fixed slot pool
//!
//! All payload bytes live in one arena of `capacity * block_size` bytes that is
//! allocated once. Slot `i` owns the range `[i * block_size, (i + 1) * block_size)`
//! and is recycled in place, never freed.

use crate::error::{Error, Result};

/// Per-slot metadata. Links are pool indices.
#[derive(Debug, Default)]
pub(crate) struct Slot {
    key_hash: u64,
    /// Key bytes, kept only in verified key mode
    key: Vec<u8>,
    len: usize,
    pub(crate) prev: Option<usize>,
    pub(crate) next: Option<usize>,
}

pub(crate) struct SlotPool {
    slots: Vec<Slot>,
    data: Vec<u8>,
    block_size: usize,
    in_use: usize,
}

impl SlotPool {
    /// Allocate `capacity` empty slots of `block_size` bytes each
    pub(crate) fn new(capacity: usize, block_size: usize) -> Result<Self> {
        let alloc_err = |source| Error::Alloc {
            slots: capacity,
            block_size,
            source,
        };

        // Overflowing products saturate and fail the reservation below.
        let total = capacity.saturating_mul(block_size);
        let mut data = Vec::new();
        data.try_reserve_exact(total).map_err(alloc_err)?;
        data.resize(total, 0);

        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity).map_err(alloc_err)?;
        slots.resize_with(capacity, Slot::default);

        Ok(Self {
            slots,
            data,
            block_size,
            in_use: 0,
        })
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of slots brought into service so far
    #[cfg(test)]
    pub(crate) fn in_use(&self) -> usize {
        self.in_use
    }

    /// Take the next never-used slot, if any remain
    pub(crate) fn claim(&mut self) -> Option<usize> {
        if self.in_use == self.slots.len() {
            return None;
        }
        let idx = self.in_use;
        self.in_use += 1;
        Some(idx)
    }

    /// Overwrite slot `idx` with a new entry.
    ///
    /// Copies at most `block_size` bytes of `value` and returns the number stored.
    /// `key` is recorded when given and cleared otherwise.
    pub(crate) fn write(
        &mut self,
        idx: usize,
        key_hash: u64,
        key: Option<&[u8]>,
        value: &[u8],
    ) -> usize {
        let stored = value.len().min(self.block_size);
        let start = idx * self.block_size;
        self.data[start..start + stored].copy_from_slice(&value[..stored]);

        let slot = &mut self.slots[idx];
        slot.key_hash = key_hash;
        slot.len = stored;
        slot.key.clear();
        if let Some(key) = key {
            slot.key.extend_from_slice(key);
        }
        stored
    }

    /// Valid bytes of slot `idx`, excluding stale tail bytes from earlier entries
    pub(crate) fn bytes(&self, idx: usize) -> &[u8] {
        let start = idx * self.block_size;
        &self.data[start..start + self.slots[idx].len]
    }

    pub(crate) fn key_hash(&self, idx: usize) -> u64 {
        self.slots[idx].key_hash
    }

    pub(crate) fn key(&self, idx: usize) -> &[u8] {
        &self.slots[idx].key
    }

    pub(crate) fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub(crate) fn slots_mut(&mut self) -> &mut [Slot] {
        &mut self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_preallocated() {
        let pool = SlotPool::new(4, 64).unwrap();
        assert_eq!(pool.capacity(), 4);
        assert_eq!(pool.block_size(), 64);
        assert_eq!(pool.in_use(), 0);
        assert_eq!(pool.data.len(), 4 * 64);
    }

    #[test]
    fn test_claim_in_order() {
        let mut pool = SlotPool::new(2, 64).unwrap();
        assert_eq!(pool.claim(), Some(0));
        assert_eq!(pool.claim(), Some(1));
        assert_eq!(pool.claim(), None);
        assert_eq!(pool.in_use(), 2);
    }

    #[test]
    fn test_write_truncates() {
        let mut pool = SlotPool::new(1, 50).unwrap();
        let value = vec![b'x'; 80];
        assert_eq!(pool.write(0, 7, None, &value), 50);
        assert_eq!(pool.bytes(0), &value[..50]);
        assert_eq!(pool.key_hash(0), 7);
    }

    #[test]
    fn test_rewrite_hides_stale_bytes() {
        let mut pool = SlotPool::new(1, 64).unwrap();
        pool.write(0, 1, None, b"a long first value");
        pool.write(0, 2, None, b"short");
        assert_eq!(pool.bytes(0), b"short");
        assert_eq!(pool.key_hash(0), 2);
    }

    #[test]
    fn test_slots_do_not_overlap() {
        let mut pool = SlotPool::new(3, 50).unwrap();
        pool.write(0, 0, None, &[b'a'; 50]);
        pool.write(1, 1, None, &[b'b'; 50]);
        pool.write(2, 2, None, &[b'c'; 50]);
        assert!(pool.bytes(0).iter().all(|&b| b == b'a'));
        assert!(pool.bytes(1).iter().all(|&b| b == b'b'));
        assert!(pool.bytes(2).iter().all(|&b| b == b'c'));
    }

    #[test]
    fn test_key_recorded_and_cleared() {
        let mut pool = SlotPool::new(1, 64).unwrap();
        pool.write(0, 1, Some(&b"ONE"[..]), b"Lorem");
        assert_eq!(pool.key(0), b"ONE");
        pool.write(0, 1, None, b"ipsum");
        assert!(pool.key(0).is_empty());
    }

    #[test]
    fn test_alloc_failure() {
        let result = SlotPool::new(usize::MAX / 2, 1024);
        assert!(matches!(result, Err(Error::Alloc { .. })));
    }
}
