//! HttpPredictor - PredictBackend over a remote prediction service

use async_trait::async_trait;
use bytes::Bytes;

use elector_core::{BackendError, BackendResult, BackendTarget, FeatureVector, PredictBackend};

use crate::client::PredictClient;
use crate::error::ClientError;

/// A `PredictBackend` that reaches a remote predictor over HTTP
pub struct HttpPredictor {
    client: PredictClient,
    target: BackendTarget,
}

impl HttpPredictor {
    /// Create a predictor for one resolved target, with default client
    /// timeouts
    pub fn new(target: BackendTarget) -> Result<Self, ClientError> {
        let client = PredictClient::new(&target.base_url)?;
        Ok(Self { client, target })
    }

    /// Create a predictor around an existing client (custom timeouts,
    /// shared connection pool settings)
    pub fn with_client(target: BackendTarget, client: PredictClient) -> Self {
        Self { client, target }
    }
}

#[async_trait]
impl PredictBackend for HttpPredictor {
    fn target(&self) -> &BackendTarget {
        &self.target
    }

    async fn predict(&self, features: &FeatureVector) -> BackendResult<Bytes> {
        self.client.predict(features).await.map_err(|err| match err {
            ClientError::Http(e) if e.is_timeout() => BackendError::Timeout,
            ClientError::Server { status, .. } => BackendError::Status { status },
            other => BackendError::Transport(other.to_string()),
        })
    }
}
