//! Geocoder configuration.
//!
//! Every knob has a production-friendly default and can be overridden from
//! the environment:
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GEOCODER_API_KEY` (or `GOOGLE_MAPS_API_KEY`) | OS keyring entry `batch-geocoder/google` |
//! | `GEOCODER_BASE_URL` | `https://maps.googleapis.com` |
//! | `GEOCODER_HTTP_TIMEOUT_SECS` | 30 |
//! | `GEOCODER_PROXY_URL` | none |
//! | `GEOCODER_BATCH_SIZE` | 10 |
//! | `GEOCODER_BATCH_DELAY_MS` | 100 |

use crate::batch::BatchConfig;
use crate::{Error, ErrorContext, Result};
use keyring::Entry;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

const KEYRING_SERVICE: &str = "batch-geocoder";
const KEYRING_USER: &str = "google";

#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 32,
            pool_idle_timeout: Duration::from_secs(90),
            proxy_url: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeocoderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub http: HttpSettings,
    pub batch: BatchConfig,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: HttpSettings::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl GeocoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from process environment, falling back to the OS keyring for the
    /// API key.
    pub fn from_env() -> Self {
        let mut cfg = Self::from_lookup(|name| std::env::var(name).ok());
        if cfg.api_key.is_none() {
            cfg.api_key = api_key_from_keyring();
        }
        cfg
    }

    /// Load from an arbitrary variable source. Unparseable numbers keep their
    /// defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        cfg.api_key = lookup("GEOCODER_API_KEY")
            .or_else(|| lookup("GOOGLE_MAPS_API_KEY"))
            .filter(|k| !k.trim().is_empty());

        if let Some(url) = lookup("GEOCODER_BASE_URL") {
            cfg.base_url = url;
        }
        if let Some(secs) = lookup("GEOCODER_HTTP_TIMEOUT_SECS").and_then(|s| s.parse::<u64>().ok()) {
            cfg.http.timeout = Duration::from_secs(secs);
        }
        cfg.http.proxy_url = lookup("GEOCODER_PROXY_URL");
        if let Some(n) = lookup("GEOCODER_BATCH_SIZE").and_then(|s| s.parse::<usize>().ok()) {
            cfg.batch.batch_size = n;
        }
        if let Some(ms) = lookup("GEOCODER_BATCH_DELAY_MS").and_then(|s| s.parse::<u64>().ok()) {
            cfg.batch.inter_batch_delay = Duration::from_millis(ms);
        }
        cfg
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http.timeout = timeout;
        self
    }

    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = batch;
        self
    }

    /// Check the settings needed by the HTTP provider.
    pub fn validate(&self) -> Result<()> {
        self.batch.validate()?;
        self.parsed_base_url()?;
        match self.api_key.as_deref() {
            Some(k) if !k.trim().is_empty() => Ok(()),
            _ => Err(Error::configuration_with_context(
                "missing geocoding API key",
                ErrorContext::new()
                    .with_field_path("GEOCODER_API_KEY")
                    .with_details("set GEOCODER_API_KEY or GOOGLE_MAPS_API_KEY")
                    .with_source("config"),
            )),
        }
    }

    pub(crate) fn parsed_base_url(&self) -> Result<url::Url> {
        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            Error::configuration_with_context(
                "invalid provider base URL",
                ErrorContext::new()
                    .with_field_path("GEOCODER_BASE_URL")
                    .with_details(format!("{}: {}", self.base_url, e))
                    .with_source("config"),
            )
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::configuration_with_context(
                "provider base URL must use http or https",
                ErrorContext::new()
                    .with_field_path("GEOCODER_BASE_URL")
                    .with_details(self.base_url.clone())
                    .with_source("config"),
            ));
        }
        Ok(parsed)
    }
}

fn api_key_from_keyring() -> Option<String> {
    let entry = Entry::new(KEYRING_SERVICE, KEYRING_USER).ok()?;
    match entry.get_password() {
        Ok(key) => Some(key),
        Err(e) => {
            tracing::debug!(error = %e, "no geocoding API key in keyring");
            None
        }
    }
}
