//! Application state for the elector API

use std::sync::Arc;

use elector_race::Elector;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    elector: Arc<Elector>,
}

impl AppState {
    /// Create a new AppState around the shared race coordinator
    pub fn new(elector: Arc<Elector>) -> Self {
        Self { elector }
    }

    /// Get the race coordinator
    pub fn elector(&self) -> &Elector {
        &self.elector
    }
}
