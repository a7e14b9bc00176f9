//! Liveness and registry discovery handlers

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use elector_core::BackendTarget;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
}

/// GET /health
/// Static liveness payload
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "elector",
    })
}

#[derive(Serialize)]
pub struct TargetsResponse {
    pub items: Vec<TargetInfo>,
}

#[derive(Serialize)]
pub struct TargetInfo {
    pub name: String,
    pub base_url: String,
    pub is_primary: bool,
}

impl From<BackendTarget> for TargetInfo {
    fn from(target: BackendTarget) -> Self {
        Self {
            name: target.name,
            base_url: target.base_url,
            is_primary: target.is_primary,
        }
    }
}

/// GET /targets
/// The resolved backend registry, in dispatch order
pub async fn list_targets(State(state): State<AppState>) -> Json<TargetsResponse> {
    let items = state
        .elector()
        .targets()
        .into_iter()
        .map(TargetInfo::from)
        .collect();

    Json(TargetsResponse { items })
}
