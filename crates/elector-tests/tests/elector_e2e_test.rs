//! End-to-end tests for the prediction elector
//!
//! These tests run the full stack over real sockets:
//! 1. Start mock model servers (axum, ephemeral ports) with scripted
//!    latency or failure
//! 2. Wire HTTP predictors and the race coordinator exactly like the
//!    daemon does
//! 3. Exercise the REST API with elector-client and verify which
//!    backend's payload wins

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use elector_api::{create_router, AppState};
use elector_client::testing::TestServer;
use elector_client::{ClientError, HttpPredictor, PredictClient};
use elector_core::{BackendTarget, FeatureVector, PredictBackend, RaceConfig};
use elector_race::Elector;

fn features() -> FeatureVector {
    FeatureVector {
        s_l: 5.1,
        s_w: 3.5,
        p_l: 1.4,
        p_w: 0.2,
    }
}

/// In-process stand-in for a model service: answers after `delay` with a
/// payload naming itself.
fn model_router(model_type: &'static str, delay: Duration) -> Router {
    Router::new()
        .route(
            "/predict",
            post(move |Json(features): Json<FeatureVector>| async move {
                tokio::time::sleep(delay).await;
                Json(json!({
                    "model_type": model_type,
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
            get(move || async move { Json(json!({"status": "healthy", "model": model_type})) }),
        )
}

/// Model service whose predictions always fail
fn failing_router() -> Router {
    Router::new().route(
        "/predict",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "model exploded") }),
    )
}

/// Full elector stack: the API server plus the model servers it races
struct ElectorStack {
    server: TestServer,
    // Kept alive for the duration of the test; dropping them would close
    // the model sockets.
    _models: Vec<TestServer>,
}

impl ElectorStack {
    /// Start one model server per (name, router, is_primary) entry and an
    /// elector racing all of them
    async fn start(models: Vec<(&str, Router, bool)>, config: RaceConfig) -> Self {
        let mut model_servers = Vec::new();
        let mut backends: Vec<Arc<dyn PredictBackend>> = Vec::new();

        for (name, router, is_primary) in models {
            let model_server = TestServer::start(router).await.expect("model server starts");
            let target = BackendTarget::new(name, model_server.base_url(), is_primary);
            backends.push(Arc::new(HttpPredictor::new(target).expect("valid target")));
            model_servers.push(model_server);
        }

        let elector = Elector::new(backends, config).expect("valid backend set");
        let state = AppState::new(Arc::new(elector));
        let server = TestServer::start(create_router(state))
            .await
            .expect("elector server starts");

        Self {
            server,
            _models: model_servers,
        }
    }

    /// Start an elector whose primary points at a closed port
    async fn start_with_unreachable_primary(
        canary_router: Router,
        config: RaceConfig,
    ) -> Self {
        // Grab a free port, then close it so connections are refused.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let refused = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let canary_server = TestServer::start(canary_router).await.expect("model server starts");

        let backends: Vec<Arc<dyn PredictBackend>> = vec![
            Arc::new(
                HttpPredictor::new(BackendTarget::new("model", refused, true))
                    .expect("valid target"),
            ),
            Arc::new(
                HttpPredictor::new(BackendTarget::new(
                    "canary",
                    canary_server.base_url(),
                    false,
                ))
                .expect("valid target"),
            ),
        ];

        let elector = Elector::new(backends, config).expect("valid backend set");
        let state = AppState::new(Arc::new(elector));
        let server = TestServer::start(create_router(state))
            .await
            .expect("elector server starts");

        Self {
            server,
            _models: vec![canary_server],
        }
    }

    fn client(&self) -> &PredictClient {
        self.server.client()
    }

    async fn predict_value(&self) -> Value {
        let payload = self.client().predict(&features()).await.unwrap();
        serde_json::from_slice(&payload).unwrap()
    }
}

#[tokio::test]
async fn test_primary_wins_when_both_succeed() {
    let stack = ElectorStack::start(
        vec![
            ("model", model_router("RandomForest", Duration::from_millis(50)), true),
            ("canary", model_router("GaussianNB", Duration::from_millis(10)), false),
        ],
        RaceConfig::from_millis(400, 800),
    )
    .await;

    let value = stack.predict_value().await;
    assert_eq!(value["model_type"], "RandomForest");
    // The winning payload carries the request features back.
    assert_eq!(value["input_data"]["p_w"], 0.2);
}

#[tokio::test]
async fn test_canary_wins_when_primary_times_out() {
    let stack = ElectorStack::start(
        vec![
            ("model", model_router("RandomForest", Duration::from_millis(600)), true),
            ("canary", model_router("GaussianNB", Duration::from_millis(20)), false),
        ],
        RaceConfig::from_millis(150, 500),
    )
    .await;

    let value = stack.predict_value().await;
    assert_eq!(value["model_type"], "GaussianNB");
}

#[tokio::test]
async fn test_canary_wins_when_primary_errors() {
    let stack = ElectorStack::start(
        vec![
            ("model", failing_router(), true),
            ("canary", model_router("GaussianNB", Duration::from_millis(30)), false),
        ],
        RaceConfig::from_millis(400, 800),
    )
    .await;

    let value = stack.predict_value().await;
    assert_eq!(value["model_type"], "GaussianNB");
}

#[tokio::test]
async fn test_canary_wins_when_primary_unreachable() {
    let stack = ElectorStack::start_with_unreachable_primary(
        model_router("GaussianNB", Duration::from_millis(30)),
        RaceConfig::from_millis(400, 800),
    )
    .await;

    let value = stack.predict_value().await;
    assert_eq!(value["model_type"], "GaussianNB");
}

#[tokio::test]
async fn test_primary_wins_even_when_slower_but_inside_deadline() {
    // Both land close to the budget; preference still beats speed.
    let stack = ElectorStack::start(
        vec![
            ("model", model_router("RandomForest", Duration::from_millis(160)), true),
            ("canary", model_router("GaussianNB", Duration::from_millis(60)), false),
        ],
        RaceConfig::from_millis(300, 500),
    )
    .await;

    let value = stack.predict_value().await;
    assert_eq!(value["model_type"], "RandomForest");
}

#[tokio::test]
async fn test_service_unavailable_when_every_backend_exceeds_its_timeout() {
    let stack = ElectorStack::start(
        vec![
            ("model", model_router("RandomForest", Duration::from_millis(600)), true),
            ("canary", model_router("GaussianNB", Duration::from_millis(600)), false),
        ],
        RaceConfig::from_millis(120, 400),
    )
    .await;

    let err = stack.client().predict(&features()).await.unwrap_err();
    match err {
        ClientError::Server { status, message } => {
            assert_eq!(status, 503);
            assert!(message.contains("service_unavailable"));
        }
        other => panic!("expected a 503 server error, got {}", other),
    }
}

#[tokio::test]
async fn test_request_resolves_within_the_aggregate_deadline() {
    let stack = ElectorStack::start(
        vec![
            ("model", model_router("RandomForest", Duration::from_secs(2)), true),
            ("canary", model_router("GaussianNB", Duration::from_secs(2)), false),
        ],
        RaceConfig::from_millis(3000, 300),
    )
    .await;

    let started = Instant::now();
    let result = stack.client().predict(&features()).await;
    let elapsed = started.elapsed();

    // Nothing finished inside the budget, so the request fails fast.
    assert!(result.is_err());
    assert!(
        elapsed < Duration::from_secs(1),
        "request took {:?}, expected the aggregate deadline to cut it short",
        elapsed
    );
}

#[tokio::test]
async fn test_health_and_targets_surface() {
    let stack = ElectorStack::start(
        vec![
            ("model", model_router("RandomForest", Duration::from_millis(10)), true),
            ("canary", model_router("GaussianNB", Duration::from_millis(10)), false),
        ],
        RaceConfig::default(),
    )
    .await;

    let health = stack.client().health().await.unwrap();
    assert!(health.contains("healthy"));

    let response = reqwest::get(format!("{}/targets", stack.server.base_url()))
        .await
        .unwrap();
    let value: Value = response.json().await.unwrap();
    let items = value["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["name"], "model");
}
