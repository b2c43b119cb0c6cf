use crate::batch::{BatchConfig, BatchScheduler};
use crate::cache::{GeocodeCache, MemoryCache};
use crate::client::core::Geocoder;
use crate::config::GeocoderConfig;
use crate::inflight::Resolver;
use crate::provider::{GeocodeProvider, GoogleGeocoder};
use crate::Result;
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`Geocoder`].
///
/// Without an injected provider the builder creates a [`GoogleGeocoder`]
/// from the config, which then requires an API key.
pub struct GeocoderBuilder {
    config: GeocoderConfig,
    provider: Option<Arc<dyn GeocodeProvider>>,
    cache: Option<Arc<dyn GeocodeCache>>,
}

impl GeocoderBuilder {
    pub fn new() -> Self {
        Self {
            config: GeocoderConfig::default(),
            provider: None,
            cache: None,
        }
    }

    /// Start from environment variables (see [`crate::config`]).
    pub fn from_env() -> Self {
        Self::new().config(GeocoderConfig::from_env())
    }

    pub fn config(mut self, config: GeocoderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = Some(key.into());
        self
    }

    /// Override the provider base URL. Primarily for testing with mock servers.
    pub fn base_url_override(mut self, base_url: impl Into<String>) -> Self {
        self.config.base_url = base_url.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.http.timeout = timeout;
        self
    }

    pub fn batch_size(mut self, n: usize) -> Self {
        self.config.batch.batch_size = n;
        self
    }

    pub fn inter_batch_delay(mut self, delay: Duration) -> Self {
        self.config.batch.inter_batch_delay = delay;
        self
    }

    pub fn batch_config(mut self, batch: BatchConfig) -> Self {
        self.config.batch = batch;
        self
    }

    /// Use a custom provider instead of the Google adapter.
    pub fn provider(mut self, provider: Arc<dyn GeocodeProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Use an explicit cache. The default is a fresh [`MemoryCache`] per
    /// geocoder.
    pub fn cache(mut self, cache: Arc<dyn GeocodeCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<Geocoder> {
        let provider: Arc<dyn GeocodeProvider> = match self.provider {
            Some(p) => p,
            None => Arc::new(GoogleGeocoder::new(&self.config)?),
        };
        let cache: Arc<dyn GeocodeCache> = self
            .cache
            .unwrap_or_else(|| Arc::new(MemoryCache::new()));

        tracing::debug!(
            provider = provider.name(),
            cache = cache.name(),
            batch_size = self.config.batch.batch_size,
            delay_ms = self.config.batch.inter_batch_delay.as_millis() as u64,
            "building geocoder"
        );

        let resolver = Arc::new(Resolver::new(provider, cache));
        let scheduler = BatchScheduler::new(Arc::clone(&resolver), self.config.batch)?;
        Ok(Geocoder::from_parts(resolver, scheduler))
    }
}

impl Default for GeocoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
