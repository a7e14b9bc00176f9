//! Selection policy - reduce an aggregate outcome to one decision

use tracing::debug;

use crate::models::{AggregateOutcome, CallOutcome, Decision};

/// Pick the winning payload from a completion-ordered outcome.
///
/// The primary's success wins outright, regardless of how fast any
/// secondary was; otherwise the first secondary success in completion
/// order; otherwise no backend is available. A deterministic reduction:
/// identical results in identical completion order always yield the
/// identical decision.
pub fn decide(outcome: &AggregateOutcome) -> Decision {
    for result in outcome.results() {
        if result.target.is_primary {
            if let CallOutcome::Success(payload) = &result.outcome {
                return Decision::Selected {
                    payload: payload.clone(),
                    target: result.target.clone(),
                };
            }
        }
    }

    for result in outcome.results() {
        if let CallOutcome::Success(payload) = &result.outcome {
            debug!(
                target = %result.target.name,
                "No primary success, falling back to first success in completion order"
            );
            return Decision::Selected {
                payload: payload.clone(),
                target: result.target.clone(),
            };
        }
    }

    Decision::NoBackendAvailable
}
