//! End-to-end batch runs through the Google adapter.

use crate::integration::mock_server::{MockServerFixture, TEST_KEY};
use batch_geocoder::{Coordinate, GeocoderBuilder};
use std::time::Duration;

fn addresses(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_batch_with_partial_failures() {
    let fixture = MockServerFixture::new().await;
    let found = fixture.mock_found("A", 40.7128, -74.006, "New York, NY, USA").await;
    let missing = fixture.mock_zero_results("B").await;
    let broken = fixture.mock_status_body("C", 503, "").await;
    let geocoder = fixture.create_test_geocoder(2).unwrap();

    let mut progress = Vec::new();
    let results = geocoder
        .batch_geocode(&addresses(&["A", "B", "C", "A"]), |f, n| progress.push((f, n)))
        .await;

    assert_eq!(results.len(), 1);
    assert_eq!(results.get("A"), Some(&Coordinate::new(40.7128, -74.006, "New York, NY, USA")));
    assert_eq!(progress.last(), Some(&(1.0, 1)));
    // Each address reached the endpoint exactly once.
    found.assert_async().await;
    missing.assert_async().await;
    broken.assert_async().await;

    let stats = geocoder.stats();
    assert_eq!(stats.provider_calls, 3);
    assert_eq!(stats.no_results, 1);
    assert_eq!(stats.failures, 1);
    assert_eq!(geocoder.cache_size(), 3);
}

#[tokio::test]
async fn test_repeat_run_is_served_from_cache() {
    let fixture = MockServerFixture::new().await;
    let a = fixture.mock_found("A", 1.0, 2.0, "A, USA").await;
    let b = fixture.mock_zero_results("B").await;
    let geocoder = fixture.create_test_geocoder(10).unwrap();
    let input = addresses(&["A", "B"]);

    let first = geocoder.batch_geocode(&input, |_, _| {}).await;
    let second = geocoder.batch_geocode(&input, |_, _| {}).await;

    assert_eq!(first, second);
    a.assert_async().await;
    b.assert_async().await;
    assert_eq!(geocoder.stats().cache_hits, 2);
}

#[tokio::test]
async fn test_invalid_key_shows_up_as_all_failures() {
    let fixture = MockServerFixture::new().await;
    let denied = fixture.mock_denied_for_all(3).await;
    let geocoder = fixture.create_test_geocoder(10).unwrap();

    let report = geocoder
        .batch_geocode_report(&addresses(&["A", "B", "C"]), None, |_| {})
        .await;

    assert!(report.results.is_empty());
    assert!(report.is_completed());
    assert_eq!(report.unresolved, 3);
    assert_eq!(report.stats.failures, 3);
    assert!(geocoder.snapshot().all_lookups_failed());
    denied.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_provider_does_not_raise() {
    let geocoder = GeocoderBuilder::new()
        .api_key(TEST_KEY)
        .base_url_override("http://127.0.0.1:1")
        .timeout(Duration::from_secs(2))
        .inter_batch_delay(Duration::from_millis(1))
        .build()
        .unwrap();

    let mut progress = Vec::new();
    let results = geocoder
        .batch_geocode(&addresses(&["A", "B"]), |f, n| progress.push((f, n)))
        .await;

    assert!(results.is_empty());
    assert_eq!(progress.last(), Some(&(1.0, 0)));
    assert_eq!(geocoder.stats().failures, 2);
}

#[test]
fn test_invalid_base_url_is_rejected_at_build() {
    let err = GeocoderBuilder::new()
        .api_key(TEST_KEY)
        .base_url_override("ftp://example.com")
        .build()
        .err()
        .unwrap();
    assert!(err.to_string().contains("Configuration error"));
}
