use crate::config::HttpSettings;
use crate::error::TransportError;
use crate::Result;
use reqwest::Proxy;

/// Thin wrapper over a pooled `reqwest::Client`.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: url::Url,
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl HttpTransport {
    /// The base URL's path is kept as a prefix of every request path.
    pub fn new(mut base_url: url::Url, settings: &HttpSettings) -> Result<Self> {
        if !base_url.path().ends_with('/') {
            let prefixed = format!("{}/", base_url.path());
            base_url.set_path(&prefixed);
        }
        let mut builder = reqwest::Client::builder()
            .timeout(settings.timeout)
            .pool_max_idle_per_host(settings.pool_max_idle_per_host)
            .pool_idle_timeout(Some(settings.pool_idle_timeout))
            .user_agent(concat!("batch-geocoder/", env!("CARGO_PKG_VERSION")));

        if let Some(proxy_url) = settings.proxy_url.as_deref() {
            match Proxy::all(proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!(proxy = proxy_url, error = %e, "ignoring invalid proxy URL"),
            }
        }

        let client = builder
            .build()
            .map_err(|e| crate::Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    /// GET `path` below the base URL. Query values are percent-encoded.
    ///
    /// Returns the response regardless of HTTP status; only transport-level
    /// failures are errors.
    pub async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> std::result::Result<HttpResponse, TransportError> {
        let url = self
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| TransportError::Other(format!("invalid request path {path}: {e}")))?;

        let response = self.client.get(url).query(query).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
