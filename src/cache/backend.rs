//! Cache backend implementations.

use super::stats::{AtomicStats, CacheStats};
use crate::types::CacheEntry;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Address-keyed store of lookup outcomes.
///
/// Implementations must be safe to call from many resolving tasks at once.
pub trait GeocodeCache: Send + Sync {
    /// `None` when the address was never recorded.
    fn get(&self, address: &str) -> Option<CacheEntry>;
    /// Like [`GeocodeCache::get`] but not counted in [`CacheStats`].
    fn peek(&self, address: &str) -> Option<CacheEntry>;
    fn set(&self, address: &str, entry: CacheEntry);
    fn contains(&self, address: &str) -> bool;
    fn clear(&self);
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn stats(&self) -> CacheStats;
    fn name(&self) -> &'static str;
}

pub struct MemoryCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    stats: AtomicStats,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            stats: AtomicStats::default(),
        }
    }

    // A panic while holding the lock cannot leave the map half-written, so
    // poisoned guards are recovered instead of propagated.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl GeocodeCache for MemoryCache {
    fn get(&self, address: &str) -> Option<CacheEntry> {
        let found = self.read().get(address).cloned();
        if found.is_some() {
            self.stats.hit();
        } else {
            self.stats.miss();
        }
        found
    }

    fn peek(&self, address: &str) -> Option<CacheEntry> {
        self.read().get(address).cloned()
    }

    fn set(&self, address: &str, entry: CacheEntry) {
        self.write().insert(address.to_string(), entry);
        self.stats.set();
    }

    fn contains(&self, address: &str) -> bool {
        self.read().contains_key(address)
    }

    fn clear(&self) {
        self.write().clear();
        self.stats.clear();
    }

    fn len(&self) -> usize {
        self.read().len()
    }

    fn stats(&self) -> CacheStats {
        self.stats.to_stats()
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
