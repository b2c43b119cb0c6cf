use crate::batch::{BatchConfig, BatchReport, BatchScheduler, ProgressEvent};
use crate::cache::GeocodeCache;
use crate::client::signals::ResolverSnapshot;
use crate::inflight::{Resolver, ResolverStats};
use crate::types::{Coordinate, ResultMapping};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_util::sync::CancellationToken;

/// Cache-backed, deduplicating, batched address resolver.
///
/// Each instance owns its cache and in-flight registry; nothing is shared
/// between instances unless a cache is passed explicitly to the builder.
/// Cloning a `Geocoder` shares that state.
#[derive(Clone)]
pub struct Geocoder {
    resolver: Arc<Resolver>,
    scheduler: BatchScheduler,
}

impl Geocoder {
    pub(crate) fn from_parts(resolver: Arc<Resolver>, scheduler: BatchScheduler) -> Self {
        Self { resolver, scheduler }
    }

    /// Resolve a single address through the cache and the in-flight registry.
    pub async fn resolve(&self, address: &str) -> Option<Coordinate> {
        self.resolver.resolve(address).await
    }

    /// Resolve `addresses` in paced batches.
    ///
    /// `progress` receives `(fraction, resolved_so_far)` after every batch and
    /// `(1.0, resolved)` before this returns. Failed addresses are absent from
    /// the returned mapping; no error is surfaced.
    pub async fn batch_geocode<F>(&self, addresses: &[String], progress: F) -> ResultMapping
    where
        F: FnMut(f64, usize),
    {
        self.scheduler.run(addresses, progress).await
    }

    /// Like [`Geocoder::batch_geocode`] but returns diagnostics and honors a
    /// cancellation token between batches.
    pub async fn batch_geocode_report<F>(
        &self,
        addresses: &[String],
        cancel: Option<&CancellationToken>,
        progress: F,
    ) -> BatchReport
    where
        F: FnMut(&ProgressEvent),
    {
        self.scheduler.run_with_report(addresses, cancel, progress).await
    }

    /// Run on a background task and stream progress events.
    pub fn batch_geocode_stream(
        &self,
        addresses: Vec<String>,
        cancel: CancellationToken,
    ) -> (UnboundedReceiverStream<ProgressEvent>, JoinHandle<BatchReport>) {
        self.scheduler.run_stream(addresses, cancel)
    }

    pub fn cache_size(&self) -> usize {
        self.resolver.cache().len()
    }

    /// Empty the cache. Lookups already in flight still complete and record
    /// their outcome.
    pub fn clear_cache(&self) {
        self.resolver.cache().clear();
        tracing::debug!("geocode cache cleared");
    }

    pub fn cache(&self) -> &Arc<dyn GeocodeCache> {
        self.resolver.cache()
    }

    pub fn in_flight(&self) -> usize {
        self.resolver.in_flight()
    }

    pub fn stats(&self) -> ResolverStats {
        self.resolver.stats()
    }

    pub fn batch_config(&self) -> &BatchConfig {
        self.scheduler.config()
    }

    pub fn provider_name(&self) -> &'static str {
        self.resolver.provider_name()
    }

    pub fn snapshot(&self) -> ResolverSnapshot {
        let cache = self.resolver.cache();
        ResolverSnapshot {
            cache_entries: cache.len(),
            in_flight: self.resolver.in_flight(),
            cache: cache.stats(),
            stats: self.resolver.stats(),
        }
    }
}
