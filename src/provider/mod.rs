//! 地理编码服务适配模块：向外部服务发起单次查询并解释其响应。
//!
//! # Provider Adapter Module
//!
//! A [`GeocodeProvider`] issues exactly one lookup per call and reports a
//! typed [`LookupError`] on failure. [`fetch`] sits between the resolver and
//! the provider: it never propagates errors, degrading every failure into an
//! unresolved outcome after logging it.
//!
//! | Failure | Level | Outcome |
//! |---------|-------|---------|
//! | [`LookupError::NoResult`] | `warn` | [`LookupOutcome::NoResult`] |
//! | any other [`LookupError`] | `error` | [`LookupOutcome::Failed`] |
//!
//! No retries are attempted.

mod google;

pub use google::{GeocodeResponse, GeocodeResult, Geometry, GoogleGeocoder, Location};

use crate::transport::TransportError;
use crate::types::Coordinate;
use async_trait::async_trait;
use std::time::Instant;
use thiserror::Error;

#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Resolve one address. Implementations must not retry.
    async fn lookup(&self, address: &str) -> Result<Coordinate, LookupError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Error)]
pub enum LookupError {
    /// The provider answered but found no match.
    #[error("no results")]
    NoResult,

    #[error("provider status {status}{}", format_message(.message))]
    Status {
        status: String,
        message: Option<String>,
    },

    #[error("HTTP {status}")]
    Http { status: u16 },

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
}

fn format_message(message: &Option<String>) -> String {
    match message {
        Some(m) => format!(": {}", m),
        None => String::new(),
    }
}

impl LookupError {
    pub fn is_no_result(&self) -> bool {
        matches!(self, LookupError::NoResult)
    }
}

/// Result of one provider call after error degradation.
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    Resolved(Coordinate),
    NoResult,
    Failed,
}

impl LookupOutcome {
    pub fn into_coordinate(self) -> Option<Coordinate> {
        match self {
            LookupOutcome::Resolved(c) => Some(c),
            LookupOutcome::NoResult | LookupOutcome::Failed => None,
        }
    }
}

/// Issue one lookup and degrade any error into an unresolved outcome.
pub async fn fetch(provider: &dyn GeocodeProvider, address: &str) -> LookupOutcome {
    let start = Instant::now();
    match provider.lookup(address).await {
        Ok(coordinate) => {
            tracing::debug!(
                provider = provider.name(),
                address,
                duration_ms = start.elapsed().as_millis() as u64,
                "geocoded address"
            );
            LookupOutcome::Resolved(coordinate)
        }
        Err(LookupError::NoResult) => {
            tracing::warn!(provider = provider.name(), address, "no results found for address");
            LookupOutcome::NoResult
        }
        Err(e) => {
            tracing::error!(
                provider = provider.name(),
                address,
                error = %e,
                duration_ms = start.elapsed().as_millis() as u64,
                "geocoding failed"
            );
            LookupOutcome::Failed
        }
    }
}
