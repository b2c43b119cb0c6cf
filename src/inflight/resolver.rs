//! Cache-first, deduplicating address resolver.

use super::registry::{Completion, InFlightRegistry, PendingHandle};
use crate::cache::GeocodeCache;
use crate::provider::{self, GeocodeProvider, LookupOutcome};
use crate::types::Coordinate;
use futures::FutureExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Counters describing what the resolver did.
///
/// `failures` covers transport errors, bad statuses and malformed responses,
/// which is how a systemic failure such as an invalid API key shows up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub provider_calls: u64,
    pub resolved: u64,
    pub no_results: u64,
    pub failures: u64,
    pub cache_hits: u64,
    pub joined_in_flight: u64,
}

impl ResolverStats {
    /// Difference between two snapshots of the same resolver.
    pub fn since(&self, earlier: &ResolverStats) -> ResolverStats {
        ResolverStats {
            provider_calls: self.provider_calls.saturating_sub(earlier.provider_calls),
            resolved: self.resolved.saturating_sub(earlier.resolved),
            no_results: self.no_results.saturating_sub(earlier.no_results),
            failures: self.failures.saturating_sub(earlier.failures),
            cache_hits: self.cache_hits.saturating_sub(earlier.cache_hits),
            joined_in_flight: self.joined_in_flight.saturating_sub(earlier.joined_in_flight),
        }
    }
}

#[derive(Default)]
struct Counters {
    provider_calls: AtomicU64,
    resolved: AtomicU64,
    no_results: AtomicU64,
    failures: AtomicU64,
    cache_hits: AtomicU64,
    joined_in_flight: AtomicU64,
}

impl Counters {
    fn record(&self, outcome: &LookupOutcome) {
        let counter = match outcome {
            LookupOutcome::Resolved(_) => &self.resolved,
            LookupOutcome::NoResult => &self.no_results,
            LookupOutcome::Failed => &self.failures,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn snapshot(&self) -> ResolverStats {
        ResolverStats {
            provider_calls: self.provider_calls.load(Ordering::Relaxed),
            resolved: self.resolved.load(Ordering::Relaxed),
            no_results: self.no_results.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            joined_in_flight: self.joined_in_flight.load(Ordering::Relaxed),
        }
    }
}

pub struct Resolver {
    provider: Arc<dyn GeocodeProvider>,
    cache: Arc<dyn GeocodeCache>,
    registry: Arc<InFlightRegistry>,
    counters: Arc<Counters>,
}

impl Resolver {
    pub fn new(provider: Arc<dyn GeocodeProvider>, cache: Arc<dyn GeocodeCache>) -> Self {
        Self {
            provider,
            cache,
            registry: Arc::new(InFlightRegistry::new()),
            counters: Arc::new(Counters::default()),
        }
    }

    /// Resolve one address. `None` means the address could not be resolved,
    /// now or in an earlier attempt.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn resolve(&self, address: &str) -> Option<Coordinate> {
        if let Some(entry) = self.cache.get(address) {
            self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(address, resolved = entry.is_resolved(), "cache hit");
            return entry.into_coordinate();
        }

        let handle = {
            let mut pending = self.registry.lock();
            if let Some(handle) = pending.get(address) {
                self.counters.joined_in_flight.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(address, "joining in-flight lookup");
                handle.clone()
            } else if let Some(entry) = self.cache.peek(address) {
                // The previous lookup finished between the cache check and the lock.
                self.counters.cache_hits.fetch_add(1, Ordering::Relaxed);
                return entry.into_coordinate();
            } else {
                let handle = self.spawn_lookup(address);
                pending.insert(address.to_string(), handle.clone());
                handle
            }
        };

        handle.await
    }

    // Called with the registry lock held; the spawned task cannot release its
    // slot before the handle is inserted.
    fn spawn_lookup(&self, address: &str) -> PendingHandle {
        self.counters.provider_calls.fetch_add(1, Ordering::Relaxed);

        let completion = Completion::new(
            address.to_string(),
            Arc::clone(&self.cache),
            Arc::clone(&self.registry),
        );
        let provider = Arc::clone(&self.provider);
        let counters = Arc::clone(&self.counters);

        let task = tokio::spawn(async move {
            let outcome = provider::fetch(provider.as_ref(), completion.address()).await;
            counters.record(&outcome);
            completion.finish(outcome.into_coordinate())
        });

        let counters = Arc::clone(&self.counters);
        let address = address.to_string();
        task.map(move |joined| match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                counters.failures.fetch_add(1, Ordering::Relaxed);
                tracing::error!(address = address.as_str(), error = %e, "geocoding task aborted");
                None
            }
        })
        .boxed()
        .shared()
    }

    pub fn cache(&self) -> &Arc<dyn GeocodeCache> {
        &self.cache
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Number of lookups currently in flight.
    pub fn in_flight(&self) -> usize {
        self.registry.len()
    }

    pub fn stats(&self) -> ResolverStats {
        self.counters.snapshot()
    }
}
