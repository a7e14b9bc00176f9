//! Mock predictor for demos and tests

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use crate::backend::PredictBackend;
use crate::error::{BackendError, BackendResult};
use crate::models::{BackendTarget, FeatureVector};

/// Scripted behavior for a mock predictor
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Answer with this payload after the configured latency
    Respond(Bytes),
    /// Fail with a transport error after the configured latency
    Fail(String),
    /// Never answer within any realistic deadline
    Hang,
}

/// In-process predictor with configurable latency and outcome.
///
/// Stands in for a real model service in the daemon's demo mode and in
/// race tests.
pub struct MockPredictor {
    target: BackendTarget,
    latency: Duration,
    behavior: MockBehavior,
}

impl MockPredictor {
    /// Create a scripted predictor
    pub fn new(target: BackendTarget, latency: Duration, behavior: MockBehavior) -> Self {
        Self {
            target,
            latency,
            behavior,
        }
    }

    /// Demo predictor answering a canned class-probability payload
    pub fn demo(target: BackendTarget, latency: Duration, model_type: &str) -> Self {
        let payload = serde_json::json!({
            "model_type": model_type,
            "predictions": {
                "probability_scores": [0.97, 0.02, 0.01],
                "predicted_class": 0,
                "predicted_species": "setosa",
            },
        });

        Self::new(
            target,
            latency,
            MockBehavior::Respond(Bytes::from(payload.to_string())),
        )
    }
}

#[async_trait]
impl PredictBackend for MockPredictor {
    fn target(&self) -> &BackendTarget {
        &self.target
    }

    async fn predict(&self, _features: &FeatureVector) -> BackendResult<Bytes> {
        match &self.behavior {
            MockBehavior::Respond(payload) => {
                tokio::time::sleep(self.latency).await;
                Ok(payload.clone())
            }
            MockBehavior::Fail(reason) => {
                tokio::time::sleep(self.latency).await;
                Err(BackendError::Transport(reason.clone()))
            }
            MockBehavior::Hang => {
                tokio::time::sleep(Duration::from_secs(86_400)).await;
                Err(BackendError::Timeout)
            }
        }
    }
}
