//! Integration tests for PredictClient and HttpPredictor against an
//! in-process model server.

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use elector_client::testing::TestServer;
use elector_client::{ClientError, HttpPredictor, PredictClient};
use elector_core::{BackendError, BackendTarget, FeatureVector, PredictBackend};

fn features() -> FeatureVector {
    FeatureVector {
        s_l: 5.1,
        s_w: 3.5,
        p_l: 1.4,
        p_w: 0.2,
    }
}

/// Minimal stand-in for a model service: echoes the features back inside
/// the prediction payload.
fn model_router() -> Router {
    Router::new()
        .route(
            "/predict",
            post(|Json(features): Json<FeatureVector>| async move {
                Json(json!({
                    "model_type": "RandomForest",
                    "predictions": {
                        "probability_scores": [0.97, 0.02, 0.01],
                        "predicted_species": "setosa",
                    },
                    "input_data": features,
                }))
            }),
        )
        .route(
            "/health",
            get(|| async { Json(json!({"status": "healthy", "model": "RandomForest"})) }),
        )
}

/// Model service that always fails its predictions
fn broken_model_router() -> Router {
    Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model exploded") }),
    )
}

#[tokio::test]
async fn test_predict_returns_raw_payload() {
    let server = TestServer::start(model_router()).await.unwrap();

    let payload = server.client().predict(&features()).await.unwrap();
    let value: Value = serde_json::from_slice(&payload).unwrap();

    assert_eq!(value["model_type"], "RandomForest");
    assert_eq!(value["input_data"]["s_l"], 5.1);

    server.shutdown().await;
}

#[tokio::test]
async fn test_health_round_trip() {
    let server = TestServer::start(model_router()).await.unwrap();

    let body = server.client().health().await.unwrap();
    assert!(body.contains("healthy"));

    server.shutdown().await;
}

#[tokio::test]
async fn test_non_2xx_is_a_server_error() {
    let server = TestServer::start(broken_model_router()).await.unwrap();

    let err = server.client().predict(&features()).await.unwrap_err();
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 500);
            assert!(message.contains("model exploded"));
        }
        other => panic!("expected a server error, got {}", other),
    }

    server.shutdown().await;
}

#[tokio::test]
async fn test_http_predictor_maps_status_errors() {
    let server = TestServer::start(broken_model_router()).await.unwrap();

    let target = BackendTarget::new("model", server.base_url(), true);
    let predictor = HttpPredictor::with_client(target, server.client().clone());

    let err = predictor.predict(&features()).await.unwrap_err();
    assert!(matches!(err, BackendError::Status { status: 500 }));

    server.shutdown().await;
}

#[tokio::test]
async fn test_http_predictor_maps_connection_failures() {
    // Grab a free port, then close it so the connection is refused.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let base_url = format!("http://{}", addr);
    let target = BackendTarget::new("model", &base_url, true);
    let client = PredictClient::new(&base_url).unwrap();
    let predictor = HttpPredictor::with_client(target, client);

    let err = predictor.predict(&features()).await.unwrap_err();
    assert!(matches!(err, BackendError::Transport(_)));
}
