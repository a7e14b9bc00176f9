//! elector-client - HTTP client for prediction backends
//!
//! Provides [`PredictClient`] for talking to one prediction service
//! (`POST /predict`, `GET /health`) and [`HttpPredictor`], the
//! `PredictBackend` implementation the race coordinator dispatches to.
//! The [`testing`] module has helpers for running servers in-process.

pub mod backend;
pub mod client;
pub mod error;
pub mod testing;

pub use backend::HttpPredictor;
pub use client::PredictClient;
pub use error::{ClientError, Result};
