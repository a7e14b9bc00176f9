//! elector-api - REST API layer for the prediction elector
//!
//! This crate provides the HTTP surface over the race coordinator:
//! `POST /predict` runs one election, `GET /health` reports liveness,
//! and `GET /targets` exposes the resolved backend registry.
//!
//! # Usage
//!
//! ```ignore
//! use elector_api::{create_router, AppState};
//! use elector_race::Elector;
//!
//! let elector = Elector::new(backends, config)?;
//! let state = AppState::new(Arc::new(elector));
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the elector REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health::health))
        // Registry discovery
        .route("/targets", get(handlers::health::list_targets))
        // Prediction race
        .route("/predict", post(handlers::predict::predict))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
