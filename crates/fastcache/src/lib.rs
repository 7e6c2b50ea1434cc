//! # fastcache
//!
//! Fixed-capacity LRU cache for byte blocks.
//!
//! ## Architecture
//! - **Slot pool**: `capacity * block_size` bytes allocated once, slots recycled in place
//! - **Recency list**: index-linked doubly-linked list over the slots (O(1) promote/evict)
//! - **Index**: AHash map from key hash to slot (O(1) lookup)
//!
//! Values longer than the block size are truncated, and the truncation is reported
//! in the [`SetOutcome`]. [`LruCache`] is single-threaded; [`SharedCache`] puts it
//! behind one or more `parking_lot` locks.
//!
//! ```
//! use fastcache::{CacheConfig, LruCache};
//!
//! let mut cache = LruCache::with_config(CacheConfig::new(2).with_block_size(64)).unwrap();
//! let _ = cache.set("ONE", b"Lorem");
//! let _ = cache.set("TWO", b"ipsum");
//! assert_eq!(cache.get("ONE"), Some(&b"Lorem"[..]));
//!
//! let _ = cache.set("3", b"dolor"); // evicts TWO
//! assert_eq!(cache.get("TWO"), None);
//! ```

#![warn(missing_docs)]

mod config;
#[cfg(feature = "diagnostics")]
mod dump;
mod error;
mod list;
mod lru;
mod shared;
mod slot;
mod stats;

pub use config::{CacheConfig, KeyMode, DEFAULT_BLOCK_SIZE, MAX_BLOCK_SIZE, MIN_BLOCK_SIZE};
#[cfg(feature = "diagnostics")]
pub use dump::{CacheDump, DumpEntry};
pub use error::{Error, Result};
pub use lru::{LruCache, SetAction, SetOutcome};
pub use shared::SharedCache;
pub use stats::CacheStats;
