//! Human-readable snapshot of cache contents (feature `diagnostics`)

use std::fmt;
use std::hash::BuildHasher;

use crate::lru::LruCache;

/// One resident entry as captured by [`LruCache::dump`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpEntry {
    /// Hash of the entry's key
    pub key_hash: u64,
    /// Stored bytes
    pub value: Vec<u8>,
}

/// Owned copy of every resident entry, most recently used first
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CacheDump {
    entries: Vec<DumpEntry>,
}

impl CacheDump {
    /// Captured entries in recency order
    pub fn entries(&self) -> &[DumpEntry] {
        &self.entries
    }
}

impl fmt::Display for CacheDump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---------------------------- DUMPING CACHE DATA ----------------------------")?;
        for (i, entry) in self.entries.iter().enumerate() {
            writeln!(
                f,
                "BLOCK #{}\tKEY: {} >> DATA: {}",
                i,
                entry.key_hash,
                String::from_utf8_lossy(&entry.value)
            )?;
        }
        write!(f, "-------------------------- END DUMPING CACHE DATA --------------------------")
    }
}

impl<S: BuildHasher> LruCache<S> {
    /// Copy out all entries for inspection. Recency is not changed.
    pub fn dump(&self) -> CacheDump {
        CacheDump {
            entries: self
                .iter()
                .map(|(key_hash, value)| DumpEntry {
                    key_hash,
                    value: value.to_vec(),
                })
                .collect(),
        }
    }
}
