//! PredictBackend trait - the outbound seam to one predictor

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::BackendResult;
use crate::models::{BackendTarget, FeatureVector};

/// One backend predictor reachable by the elector.
///
/// Implementations own their transport entirely; the race layer applies
/// the per-call timeout on top and folds every failure into a tagged
/// result.
#[async_trait]
pub trait PredictBackend: Send + Sync {
    /// The resolved target this backend calls
    fn target(&self) -> &BackendTarget;

    /// Request a prediction for one feature vector.
    ///
    /// Returns the raw response body on success; the payload stays opaque
    /// until after selection.
    async fn predict(&self, features: &FeatureVector) -> BackendResult<Bytes>;
}
