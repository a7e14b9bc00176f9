//! Integration tests for the prediction elector
//!
//! This crate contains end-to-end tests that exercise the full stack
//! over real sockets:
//! - HTTP API layer
//! - Race coordination (fan-out, deadline, selection)
//! - Outbound HTTP calls to mock model servers
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p elector-tests
//! ```
//!
//! # Test Structure
//!
//! - `elector_e2e_test.rs` - Full stack scenarios with in-process model
//!   servers on ephemeral ports

// This crate only contains tests, no library code
