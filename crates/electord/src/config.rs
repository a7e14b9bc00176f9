//! Daemon configuration
//!
//! TOML configuration for the elector daemon: server port, race timing
//! budget, and the backend target list.
//!
//! ```toml
//! [server]
//! port = 5002
//!
//! [race]
//! call_timeout_ms = 5000
//! total_deadline_ms = 10000
//!
//! [[backend]]
//! name = "model"
//! url = "http://model:5000"
//! primary = true
//!
//! [[backend]]
//! name = "canary"
//! url = "http://canary:5001"
//! ```

use serde::{Deserialize, Serialize};

use elector_core::{BackendTarget, RaceConfig};

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ElectordConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Race timing budget
    #[serde(default)]
    pub race: RaceTimingConfig,
    /// Backend predictor targets; empty means demo mode
    #[serde(default)]
    pub backend: Vec<BackendEntry>,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    5002
}

/// Race timing budget in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RaceTimingConfig {
    /// Maximum time allotted to a single backend call
    #[serde(default = "default_call_timeout_ms")]
    pub call_timeout_ms: u64,
    /// Total budget for collecting results, measured from dispatch start
    #[serde(default = "default_total_deadline_ms")]
    pub total_deadline_ms: u64,
}

impl Default for RaceTimingConfig {
    fn default() -> Self {
        Self {
            call_timeout_ms: default_call_timeout_ms(),
            total_deadline_ms: default_total_deadline_ms(),
        }
    }
}

fn default_call_timeout_ms() -> u64 {
    5000
}

fn default_total_deadline_ms() -> u64 {
    10_000
}

impl RaceTimingConfig {
    /// Convert to the core race configuration
    pub fn to_race_config(&self) -> RaceConfig {
        RaceConfig::from_millis(self.call_timeout_ms, self.total_deadline_ms)
    }
}

/// One configured backend target
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendEntry {
    /// Unique name (e.g. "model")
    pub name: String,
    /// Base URL (e.g. "http://model:5000")
    pub url: String,
    /// Whether this is the preferred predictor
    #[serde(default)]
    pub primary: bool,
}

impl BackendEntry {
    /// Convert to a core target
    pub fn to_target(&self) -> BackendTarget {
        BackendTarget::new(&self.name, &self.url, self.primary)
    }
}
