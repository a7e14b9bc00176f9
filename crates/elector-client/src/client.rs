//! HTTP client for a single prediction backend

use std::time::Duration;

use bytes::Bytes;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use elector_core::FeatureVector;

use crate::error::{ClientError, Result};

/// Default request timeout.
///
/// Deliberately above any realistic per-call race budget: the race
/// timer, not the transport, decides timeout tagging.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for one prediction backend
#[derive(Debug, Clone)]
pub struct PredictClient {
    client: Client,
    base_url: Url,
}

impl PredictClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Base URL of the predictor (e.g., "http://model:5000")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        base_url: &str,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url)?;

        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check backend liveness
    #[instrument(skip(self))]
    pub async fn health(&self) -> Result<String> {
        let url = self.base_url.join("/health")?;
        let response = self.client.get(url).send().await?;

        if response.status().is_success() {
            Ok(response.text().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Request a prediction for one feature vector.
    ///
    /// Returns the raw response body on success; decoding is deferred
    /// until after selection.
    #[instrument(skip(self, features))]
    pub async fn predict(&self, features: &FeatureVector) -> Result<Bytes> {
        let url = self.base_url.join("/predict")?;
        debug!("Requesting prediction from {}", url);

        let response = self.client.post(url).json(features).send().await?;

        if response.status().is_success() {
            Ok(response.bytes().await?)
        } else {
            Err(self.extract_error(response).await)
        }
    }

    /// Build a typed error from a non-2xx response
    async fn extract_error(&self, response: reqwest::Response) -> ClientError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "<no body>".to_string());

        ClientError::server_error(status, message)
    }
}
