//! Google Geocoding API adapter.

use super::{GeocodeProvider, LookupError};
use crate::config::GeocoderConfig;
use crate::transport::HttpTransport;
use crate::types::Coordinate;
use crate::{Error, ErrorContext, Result};
use async_trait::async_trait;
use serde::Deserialize;

const GEOCODE_PATH: &str = "/maps/api/geocode/json";

const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub geometry: Geometry,
    pub formatted_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Location,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResponse {
    /// Map the provider status onto a coordinate or a typed failure.
    ///
    /// `OK` with an empty result list is treated as a provider failure, not
    /// as a zero-results answer.
    pub fn interpret(self) -> std::result::Result<Coordinate, LookupError> {
        match self.status.as_str() {
            STATUS_OK if !self.results.is_empty() => {
                let first = self.results.into_iter().next().ok_or(LookupError::NoResult)?;
                Ok(Coordinate::new(
                    first.geometry.location.lat,
                    first.geometry.location.lng,
                    first.formatted_address,
                ))
            }
            STATUS_ZERO_RESULTS => Err(LookupError::NoResult),
            _ => Err(LookupError::Status {
                status: self.status,
                message: self.error_message,
            }),
        }
    }
}

pub struct GoogleGeocoder {
    transport: HttpTransport,
    api_key: String,
}

impl std::fmt::Debug for GoogleGeocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleGeocoder")
            .field("base_url", &self.transport.base_url().as_str())
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl GoogleGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        config.validate()?;
        let api_key = config.api_key.clone().ok_or_else(|| {
            Error::configuration_with_context(
                "missing geocoding API key",
                ErrorContext::new()
                    .with_field_path("GEOCODER_API_KEY")
                    .with_source("google_geocoder"),
            )
        })?;
        let transport = HttpTransport::new(config.parsed_base_url()?, &config.http)?;
        Ok(Self { transport, api_key })
    }
}

#[async_trait]
impl GeocodeProvider for GoogleGeocoder {
    async fn lookup(&self, address: &str) -> std::result::Result<Coordinate, LookupError> {
        let response = self
            .transport
            .get(GEOCODE_PATH, &[("address", address), ("key", self.api_key.as_str())])
            .await?;

        if !response.is_success() {
            return Err(LookupError::Http {
                status: response.status,
            });
        }

        let parsed: GeocodeResponse = serde_json::from_str(&response.body)?;
        parsed.interpret()
    }

    fn name(&self) -> &'static str {
        "google"
    }
}
