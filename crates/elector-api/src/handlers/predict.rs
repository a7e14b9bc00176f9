//! Prediction handler - runs the election race

use axum::extract::State;
use axum::Json;

use elector_core::{Decision, FeatureVector};

use crate::error::ApiError;
use crate::state::AppState;

/// POST /predict
/// Race every backend for one feature vector and return the winning
/// payload
pub async fn predict(
    State(state): State<AppState>,
    Json(features): Json<FeatureVector>,
) -> Result<Json<serde_json::Value>, ApiError> {
    if !features.is_finite() {
        return Err(ApiError::BadRequest(
            "features must be finite numbers".to_string(),
        ));
    }

    match state.elector().elect(&features).await {
        Decision::Selected { payload, target } => {
            // Decode failure after selection is its own error condition,
            // not a call failure.
            let value = serde_json::from_slice(&payload).map_err(|err| {
                ApiError::Internal(format!(
                    "backend '{}' returned an undecodable payload: {}",
                    target.name, err
                ))
            })?;

            Ok(Json(value))
        }
        Decision::NoBackendAvailable => Err(ApiError::ServiceUnavailable(
            "no backend produced a prediction".to_string(),
        )),
    }
}
