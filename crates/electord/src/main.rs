//! electord - Prediction Elector Daemon
//!
//! Races a set of backend predictors for every inbound request and
//! serves the payload chosen by the selection policy.
//!
//! Usage:
//!   electord [OPTIONS] [config.toml]
//!
//! Options:
//!   --port <port>  Override the configured listen port
//!
//! If no config file is provided, two in-process mock predictors are
//! served for demo purposes.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use elector_api::{create_router, AppState};
use elector_client::HttpPredictor;
use elector_core::mock::MockPredictor;
use elector_core::{BackendTarget, PredictBackend, StaticTargets, TargetResolver};
use elector_race::Elector;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::ElectordConfig;

/// Parsed command-line arguments
struct Args {
    /// Server config file (TOML)
    config_path: Option<String>,
    /// Listen port override
    port: Option<u16>,
}

fn parse_args() -> Args {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut result = Args {
        config_path: None,
        port: None,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    match args[i + 1].parse() {
                        Ok(port) => result.port = Some(port),
                        Err(_) => tracing::error!("Invalid port: {}", args[i + 1]),
                    }
                    i += 2;
                } else {
                    tracing::error!("Missing argument for --port");
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if !arg.starts_with('-') => {
                // Positional argument = config file
                result.config_path = Some(arg.to_string());
                i += 1;
            }
            _ => {
                tracing::warn!("Unknown argument: {}", args[i]);
                i += 1;
            }
        }
    }

    result
}

fn print_help() {
    eprintln!(
        r#"electord - Prediction Elector Daemon

Usage: electord [OPTIONS] [config.toml]

Options:
  -p, --port <port>  Override the configured listen port
  -h, --help         Print this help message

Examples:
  # Run with two in-process mock predictors
  electord

  # Run with a config file
  electord config.toml

  # Run on a different port
  electord --port 8080 config.toml
"#
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "electord=info,elector_api=info,elector_race=info,elector_client=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting electord (Prediction Elector Daemon)");

    // Parse command-line arguments
    let args = parse_args();

    // Load configuration
    let config: ElectordConfig = if let Some(ref path) = args.config_path {
        tracing::info!("Loading config from: {}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        tracing::info!("No config file provided, using demo mode");
        ElectordConfig::default()
    };

    let port = args.port.unwrap_or(config.server.port);
    let race_config = config.race.to_race_config();
    tracing::info!(
        call_timeout_ms = race_config.call_timeout.as_millis() as u64,
        total_deadline_ms = race_config.total_deadline.as_millis() as u64,
        "Race budget configured"
    );

    // Resolve backends
    let backends = if config.backend.is_empty() {
        tracing::info!("Serving two in-process mock predictors");
        demo_backends()
    } else {
        let targets: Vec<BackendTarget> =
            config.backend.iter().map(|entry| entry.to_target()).collect();
        let registry = StaticTargets::new(targets)?;
        build_http_backends(&registry)?
    };

    for backend in &backends {
        let target = backend.target();
        tracing::info!(
            target = %target.name,
            url = %target.base_url,
            primary = target.is_primary,
            "Registered backend"
        );
    }

    // Create the app state and router
    let elector = Elector::new(backends, race_config)?;
    let state = AppState::new(Arc::new(elector));
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build one HTTP predictor per resolved target
fn build_http_backends(registry: &StaticTargets) -> anyhow::Result<Vec<Arc<dyn PredictBackend>>> {
    let mut backends: Vec<Arc<dyn PredictBackend>> = Vec::new();
    for target in registry.resolve_targets()? {
        let predictor = HttpPredictor::new(target)?;
        backends.push(Arc::new(predictor));
    }
    Ok(backends)
}

/// Two in-process predictors mirroring the usual primary/canary pair
fn demo_backends() -> Vec<Arc<dyn PredictBackend>> {
    vec![
        Arc::new(MockPredictor::demo(
            BackendTarget::new("model", "mock://model", true),
            Duration::from_millis(40),
            "RandomForest",
        )),
        Arc::new(MockPredictor::demo(
            BackendTarget::new("canary", "mock://canary", false),
            Duration::from_millis(15),
            "GaussianNB",
        )),
    ]
}
