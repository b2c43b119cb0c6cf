use crate::cache::CacheStats;
use crate::inflight::ResolverStats;

/// Point-in-time view of a geocoder's shared state.
///
/// Facts only: callers decide what a high failure count means (for example an
/// invalid API key when `failures` grows while `resolved` stays at zero).
#[derive(Debug, Clone, Default)]
pub struct ResolverSnapshot {
    pub cache_entries: usize,
    pub in_flight: usize,
    pub cache: CacheStats,
    pub stats: ResolverStats,
}

impl ResolverSnapshot {
    /// True when lookups have been attempted and none succeeded.
    pub fn all_lookups_failed(&self) -> bool {
        self.stats.provider_calls > 0 && self.stats.resolved == 0 && self.stats.failures > 0
    }
}
