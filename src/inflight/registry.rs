//! Address-keyed registry of pending lookups.

use crate::cache::GeocodeCache;
use crate::types::{CacheEntry, Coordinate};
use futures::future::{BoxFuture, Shared};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

/// Awaitable handle shared by every waiter of one lookup.
pub(crate) type PendingHandle = Shared<BoxFuture<'static, Option<Coordinate>>>;

#[derive(Default)]
pub struct InFlightRegistry {
    pending: Mutex<HashMap<String, PendingHandle>>,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, HashMap<String, PendingHandle>> {
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, address: &str) -> bool {
        self.lock().contains_key(address)
    }

    fn remove(&self, address: &str) {
        self.lock().remove(address);
    }
}

/// Records the outcome of one lookup and releases its registry slot.
///
/// Dropping the guard without [`Completion::finish`] (panic, runtime
/// shutdown) records the address as unresolved.
pub(crate) struct Completion {
    address: String,
    cache: Arc<dyn GeocodeCache>,
    registry: Arc<InFlightRegistry>,
    entry: Option<CacheEntry>,
}

impl Completion {
    pub(crate) fn new(
        address: String,
        cache: Arc<dyn GeocodeCache>,
        registry: Arc<InFlightRegistry>,
    ) -> Self {
        Self {
            address,
            cache,
            registry,
            entry: None,
        }
    }

    pub(crate) fn address(&self) -> &str {
        &self.address
    }

    pub(crate) fn finish(mut self, outcome: Option<Coordinate>) -> Option<Coordinate> {
        self.entry = Some(CacheEntry::from_outcome(outcome.clone()));
        outcome
    }
}

impl Drop for Completion {
    fn drop(&mut self) {
        let entry = self.entry.take().unwrap_or(CacheEntry::Unresolved);
        // Cache first: once the slot is gone, readers must see the outcome.
        self.cache.set(&self.address, entry);
        self.registry.remove(&self.address);
    }
}
