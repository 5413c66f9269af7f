use crate::domain::ports::SpooferApi;
use crate::utils::error::{TransportError, TransportResult};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

pub const DEFAULT_API_ENDPOINT: &str = "https://api.spoofer.caida.org/sessions";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// reqwest-backed access to the Spoofer sessions endpoint.
#[derive(Debug, Clone)]
pub struct HttpSpooferApi {
    client: Client,
    base_url: String,
}

impl HttpSpooferApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    fn classify(error: reqwest::Error, url: &str, timeout: Duration) -> TransportError {
        if error.is_timeout() {
            tracing::warn!("Timeout error occurred for {} after {:?}", url, timeout);
            return TransportError::Timeout { timeout };
        }

        if error.is_connect() {
            tracing::error!("Connection error occurred for {}: {}", url, error);
            return TransportError::Connection {
                message: error.to_string(),
            };
        }

        if error.is_decode() {
            tracing::error!("JSON decoding failed for {}: {}", url, error);
            return TransportError::Decode {
                message: error.to_string(),
            };
        }

        tracing::error!("Request to {} failed: {}", url, error);
        TransportError::Request {
            message: error.to_string(),
        }
    }
}

#[async_trait]
impl SpooferApi for HttpSpooferApi {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json(&self, url: &str, timeout: Duration) -> TransportResult<Value> {
        tracing::debug!("Making API request to: {}", url);
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| Self::classify(e, url, timeout))?;

        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            tracing::warn!("HTTP error occurred for {}: {}", url, status);
            return Err(TransportError::Status {
                status: status.as_u16(),
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Self::classify(e, url, timeout))
    }
}
