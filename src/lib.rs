//! # batch-geocoder
//!
//! 批量地理编码库：带缓存、去重、分批节流的地址到坐标解析引擎。
//!
//! Resolve lists of free-text postal addresses into coordinates through an
//! external geocoding provider while keeping network calls to a minimum.
//!
//! ## Overview
//!
//! - **Cache-first**: every attempted address is recorded, including failures,
//!   so no address is sent to the provider twice during a geocoder's lifetime.
//! - **Deduplicated**: concurrent requests for the same unresolved address
//!   share one outbound call.
//! - **Paced**: addresses are resolved in fixed-size concurrent batches with a
//!   delay between batches.
//! - **Failure tolerant**: lookups that fail are logged and left out of the
//!   result mapping; nothing is raised to the caller.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use batch_geocoder::GeocoderBuilder;
//!
//! #[tokio::main]
//! async fn main() -> batch_geocoder::Result<()> {
//!     let geocoder = GeocoderBuilder::from_env().build()?;
//!
//!     let addresses = vec![
//!         "1600 Amphitheatre Pkwy, Mountain View, CA 94043".to_string(),
//!         "1 Infinite Loop, Cupertino, CA 95014".to_string(),
//!     ];
//!     let results = geocoder
//!         .batch_geocode(&addresses, |fraction, resolved| {
//!             println!("{:.0}% ({} resolved)", fraction * 100.0, resolved);
//!         })
//!         .await;
//!
//!     for (address, c) in &results {
//!         println!("{address}: {}, {}", c.lat, c.lng);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Address → outcome store |
//! | [`inflight`] | In-flight deduplication and the single-address resolver |
//! | [`provider`] | Geocoding provider trait and the Google adapter |
//! | [`batch`] | Batch scheduling, pacing and progress |
//! | [`client`] | [`Geocoder`] facade and builder |
//! | [`config`] | Environment-driven configuration |
//! | [`transport`] | Pooled HTTP client |
//! | [`types`] | Coordinates and cache entries |

pub mod batch;
pub mod cache;
pub mod client;
pub mod config;
pub mod inflight;
pub mod provider;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use batch::{BatchConfig, BatchReport, ProgressEvent, RunState};
pub use client::{Geocoder, GeocoderBuilder, ResolverSnapshot};
pub use config::GeocoderConfig;
pub use inflight::ResolverStats;
pub use provider::{GeocodeProvider, LookupError};
pub use types::{CacheEntry, Coordinate, ResultMapping};
pub use tokio_util::sync::CancellationToken;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
