//! Error types for fastcache

use std::collections::TryReserveError;
use std::fmt;

/// Result type alias for fastcache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a cache.
///
/// Lookups never fail: a missing key is reported as `None`.
#[derive(Debug)]
pub enum Error {
    /// Capacity must be at least one slot
    InvalidCapacity(usize),

    /// Block size outside `MIN_BLOCK_SIZE..=MAX_BLOCK_SIZE`
    InvalidBlockSize(usize),

    /// Shard count is zero or larger than the slot count
    InvalidShardCount {
        /// Requested shard count
        shards: usize,
        /// Total slot capacity being split
        capacity: usize,
    },

    /// The slot pool could not be allocated
    Alloc {
        /// Number of slots requested
        slots: usize,
        /// Bytes per slot
        block_size: usize,
        /// Underlying reservation failure
        source: TryReserveError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(n) => write!(f, "Invalid capacity: {} (must be > 0)", n),
            Error::InvalidBlockSize(size) => write!(
                f,
                "Invalid block size: {} bytes (must be {}..={})",
                size,
                crate::config::MIN_BLOCK_SIZE,
                crate::config::MAX_BLOCK_SIZE
            ),
            Error::InvalidShardCount { shards, capacity } => write!(
                f,
                "Invalid shard count: {} (must be 1..={})",
                shards, capacity
            ),
            Error::Alloc {
                slots, block_size, ..
            } => write!(
                f,
                "Failed to allocate {} slots of {} bytes",
                slots, block_size
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Alloc { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::InvalidCapacity(0).to_string(),
            "Invalid capacity: 0 (must be > 0)"
        );
        assert_eq!(
            Error::InvalidBlockSize(10).to_string(),
            "Invalid block size: 10 bytes (must be 50..=1048576)"
        );
        assert_eq!(
            Error::InvalidShardCount {
                shards: 8,
                capacity: 4
            }
            .to_string(),
            "Invalid shard count: 8 (must be 1..=4)"
        );
    }

    #[test]
    fn test_alloc_source() {
        use std::error::Error as _;

        let source = Vec::<u8>::new().try_reserve_exact(usize::MAX).unwrap_err();
        let err = Error::Alloc {
            slots: 2,
            block_size: 64,
            source,
        };
        assert!(err.source().is_some());
        assert!(Error::InvalidCapacity(0).source().is_none());
    }
}
