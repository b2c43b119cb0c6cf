//! Mock geocoding endpoint for integration tests

use batch_geocoder::{Geocoder, GeocoderBuilder};
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const GEOCODE_PATH: &str = "/maps/api/geocode/json";
pub const TEST_KEY: &str = "test-key";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: Arc<Mutex<ServerGuard>>,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self {
            server: Arc::new(Mutex::new(server)),
            base_url,
        }
    }

    /// Geocoder pointed at the mock server through `base_url_override`.
    pub fn create_test_geocoder(&self, batch_size: usize) -> batch_geocoder::Result<Geocoder> {
        GeocoderBuilder::new()
            .api_key(TEST_KEY)
            .base_url_override(&self.base_url)
            .timeout(Duration::from_secs(5))
            .batch_size(batch_size)
            .inter_batch_delay(Duration::from_millis(10))
            .build()
    }

    /// Answer `address` with a single `OK` result.
    pub async fn mock_found(&self, address: &str, lat: f64, lng: f64, formatted: &str) -> Mock {
        let body = serde_json::json!({
            "status": "OK",
            "results": [{
                "formatted_address": formatted,
                "geometry": { "location": { "lat": lat, "lng": lng } }
            }]
        });
        self.mock_status_body(address, 200, &body.to_string()).await
    }

    /// Answer `address` with a `ZERO_RESULTS` status.
    pub async fn mock_zero_results(&self, address: &str) -> Mock {
        self.mock_status_body(address, 200, r#"{"status": "ZERO_RESULTS", "results": []}"#)
            .await
    }

    /// Answer `address` with an arbitrary HTTP status and body.
    pub async fn mock_status_body(&self, address: &str, status: usize, body: &str) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("GET", GEOCODE_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("address".into(), address.into()),
                Matcher::UrlEncoded("key".into(), TEST_KEY.into()),
            ]))
            .with_status(status)
            .with_header("content-type", "application/json")
            .with_body(body)
            .expect(1)
            .create_async()
            .await
    }

    /// Answer every request with a provider-level denial.
    pub async fn mock_denied_for_all(&self, hits: usize) -> Mock {
        let mut server = self.server.lock().await;
        server
            .mock("GET", GEOCODE_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"status": "REQUEST_DENIED", "results": [], "error_message": "The provided API key is invalid."}"#,
            )
            .expect(hits)
            .create_async()
            .await
    }
}
