//! Batch Geocoding Example
//!
//! This example demonstrates the batch geocoding capabilities of batch-geocoder:
//! - GeocoderBuilder with an injected provider
//! - Progress callbacks and the progress stream
//! - Cache reuse across runs
//! - Cancellation at a batch boundary
//!
//! A canned provider stands in for the real service so the demo runs offline.
//! Set GEOCODER_API_KEY and pass `--live` to query the Google endpoint instead.
//!
//! Usage:
//!   cargo run --example batch_geocode [-- --live]

use async_trait::async_trait;
use batch_geocoder::{
    CancellationToken, Coordinate, GeocodeProvider, Geocoder, GeocoderBuilder, LookupError,
};
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;

struct CannedProvider;

#[async_trait]
impl GeocodeProvider for CannedProvider {
    async fn lookup(&self, address: &str) -> Result<Coordinate, LookupError> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        match address {
            "1600 Amphitheatre Pkwy, Mountain View, CA" => Ok(Coordinate::new(
                37.4220,
                -122.0841,
                "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA",
            )),
            "1 Infinite Loop, Cupertino, CA" => Ok(Coordinate::new(
                37.3318,
                -122.0312,
                "1 Infinite Loop, Cupertino, CA 95014, USA",
            )),
            "350 Fifth Avenue, New York, NY" => Ok(Coordinate::new(
                40.7484,
                -73.9857,
                "350 5th Ave, New York, NY 10118, USA",
            )),
            _ => Err(LookupError::NoResult),
        }
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

fn sample_addresses() -> Vec<String> {
    [
        "1600 Amphitheatre Pkwy, Mountain View, CA",
        "1 Infinite Loop, Cupertino, CA",
        "742 Evergreen Terrace, Springfield",
        "350 Fifth Avenue, New York, NY",
        "1600 Amphitheatre Pkwy, Mountain View, CA",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[tokio::main]
async fn main() -> batch_geocoder::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    println!("=== Batch Geocoder Demo ===\n");

    let live = std::env::args().any(|a| a == "--live");
    let builder = if live {
        GeocoderBuilder::from_env()
    } else {
        GeocoderBuilder::new().provider(Arc::new(CannedProvider))
    };
    let geocoder = builder
        .batch_size(2)
        .inter_batch_delay(Duration::from_millis(50))
        .build()?;
    println!("Provider: {}\n", geocoder.provider_name());

    // Example 1: Callback progress
    demo_callback(&geocoder).await;

    // Example 2: Cache reuse
    demo_cache_reuse(&geocoder).await;

    // Example 3: Progress stream with cancellation
    demo_stream_cancel(&geocoder).await;

    Ok(())
}

async fn demo_callback(geocoder: &Geocoder) {
    println!("--- Example 1: Callback Progress ---\n");

    let results = geocoder
        .batch_geocode(&sample_addresses(), |fraction, resolved| {
            println!("  progress {:>3.0}%  resolved {}", fraction * 100.0, resolved);
        })
        .await;

    for (address, c) in &results {
        println!("  {address}\n    -> {:.4}, {:.4} ({})", c.lat, c.lng, c.formatted);
    }
    println!();
}

async fn demo_cache_reuse(geocoder: &Geocoder) {
    println!("--- Example 2: Cache Reuse ---\n");

    let before = geocoder.stats();
    let report = geocoder
        .batch_geocode_report(&sample_addresses(), None, |_| {})
        .await;
    let delta = geocoder.stats().since(&before);

    println!("  resolved {} / unresolved {}", report.resolved(), report.unresolved);
    println!("  provider calls this run: {}", delta.provider_calls);
    println!("  cache entries: {}\n", geocoder.cache_size());
}

async fn demo_stream_cancel(geocoder: &Geocoder) {
    println!("--- Example 3: Progress Stream with Cancellation ---\n");

    geocoder.clear_cache();
    let cancel = CancellationToken::new();
    let (mut events, handle) = geocoder.batch_geocode_stream(sample_addresses(), cancel.clone());

    while let Some(event) = events.next().await {
        println!(
            "  batch {}/{}  {}%{}",
            event.batches_completed,
            event.batch_count,
            event.percent(),
            if event.is_final { "  (final)" } else { "" }
        );
        if event.batches_completed == 1 && !event.is_final {
            println!("  -> cancelling after the first batch");
            cancel.cancel();
        }
    }

    match handle.await {
        Ok(report) => println!(
            "  state {:?}, {} of {} batches run\n",
            report.state, report.batches_run, report.batch_count
        ),
        Err(e) => println!("  run task failed: {e}\n"),
    }
}
