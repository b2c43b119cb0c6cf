//! Google adapter against the mock endpoint.

use crate::integration::mock_server::{MockServerFixture, GEOCODE_PATH, TEST_KEY};
use batch_geocoder::provider::GoogleGeocoder;
use batch_geocoder::{Coordinate, GeocodeProvider, GeocoderConfig, LookupError};
use mockito::Matcher;

fn provider(fixture: &MockServerFixture) -> GoogleGeocoder {
    let config = GeocoderConfig::new()
        .with_api_key(TEST_KEY)
        .with_base_url(&fixture.base_url);
    GoogleGeocoder::new(&config).unwrap()
}

#[tokio::test]
async fn test_ok_response_yields_first_result() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_found("1600 Amphitheatre Pkwy", 37.422, -122.084, "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA")
        .await;

    let coordinate = tokio_test::assert_ok!(provider(&fixture).lookup("1600 Amphitheatre Pkwy").await);

    assert_eq!(
        coordinate,
        Coordinate::new(37.422, -122.084, "1600 Amphitheatre Pkwy, Mountain View, CA 94043, USA")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_zero_results_is_no_result() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_zero_results("nowhere at all").await;

    let err = provider(&fixture).lookup("nowhere at all").await.unwrap_err();

    assert!(err.is_no_result());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_denied_status_carries_provider_message() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_denied_for_all(1).await;

    let err = provider(&fixture).lookup("1 Main St").await.unwrap_err();

    match &err {
        LookupError::Status { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message.as_deref(), Some("The provided API key is invalid."));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("REQUEST_DENIED"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_status() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture
        .mock_status_body("1 Main St", 500, r#"{"error": "internal"}"#)
        .await;

    let err = provider(&fixture).lookup("1 Main St").await.unwrap_err();

    assert!(matches!(err, LookupError::Http { status: 500 }));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_body() {
    let fixture = MockServerFixture::new().await;
    let mock = fixture.mock_status_body("1 Main St", 200, "<html>oops</html>").await;

    let err = provider(&fixture).lookup("1 Main St").await.unwrap_err();

    assert!(matches!(err, LookupError::Malformed(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_address_is_query_encoded() {
    let fixture = MockServerFixture::new().await;
    let address = "221B Baker St & Co, London #2, UK";
    let mock = fixture.mock_found(address, 51.5238, -0.1586, "221B Baker St, London NW1 6XE, UK").await;

    let coordinate = provider(&fixture).lookup(address).await.unwrap();

    assert_eq!(coordinate.formatted, "221B Baker St, London NW1 6XE, UK");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_base_url_path_prefix_is_kept() {
    let fixture = MockServerFixture::new().await;
    let mut server = fixture.server.lock().await;
    let prefixed = server
        .mock("GET", "/google/maps/api/geocode/json")
        .match_query(Matcher::UrlEncoded("address".into(), "1 Main St".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"status": "OK", "results": [{"formatted_address": "1 Main St, USA", "geometry": {"location": {"lat": 1.5, "lng": -2.5}}}]}"#,
        )
        .expect(1)
        .create_async()
        .await;
    let bare = server
        .mock("GET", GEOCODE_PATH)
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    drop(server);

    let config = GeocoderConfig::new()
        .with_api_key(TEST_KEY)
        .with_base_url(format!("{}/google", fixture.base_url));
    let coordinate = tokio_test::assert_ok!(GoogleGeocoder::new(&config).unwrap().lookup("1 Main St").await);

    assert_eq!(coordinate, Coordinate::new(1.5, -2.5, "1 Main St, USA"));
    prefixed.assert_async().await;
    bare.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let config = GeocoderConfig::new()
        .with_api_key(TEST_KEY)
        .with_base_url("http://127.0.0.1:1");
    let provider = GoogleGeocoder::new(&config).unwrap();

    let err = provider.lookup("1 Main St").await.unwrap_err();

    assert!(matches!(err, LookupError::Transport(_)));
}

#[test]
fn test_missing_api_key_is_configuration_error() {
    let config = GeocoderConfig::new().with_base_url("http://127.0.0.1:1");
    let err = tokio_test::assert_err!(GoogleGeocoder::new(&config));
    assert_eq!(
        err.context().and_then(|c| c.field_path.as_deref()),
        Some("GEOCODER_API_KEY")
    );
}
