//! Election race - scatter calls, gather completions, pick a winner

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use elector_core::{
    decide, AggregateOutcome, BackendError, BackendTarget, CallOutcome, CallResult, Decision,
    FeatureVector, PredictBackend, RaceConfig, RegistryError, StaticTargets,
};

/// Run one backend call under the per-call timeout.
///
/// Every failure mode is folded into a tagged result; nothing unwinds
/// past this boundary. Each terminal result is logged with target
/// identity, outcome kind, and elapsed time.
pub async fn execute_call(
    backend: &dyn PredictBackend,
    features: &FeatureVector,
    call_timeout: Duration,
) -> CallResult {
    let target = backend.target().clone();
    debug!(target = %target.name, url = %target.base_url, "Calling backend");

    let started = Instant::now();
    let outcome = match tokio::time::timeout(call_timeout, backend.predict(features)).await {
        Ok(Ok(payload)) => CallOutcome::Success(payload),
        Ok(Err(BackendError::Timeout)) => CallOutcome::Timeout,
        Ok(Err(err)) => CallOutcome::Error(err.to_string()),
        Err(_) => CallOutcome::Timeout,
    };
    let elapsed = started.elapsed();

    match &outcome {
        CallOutcome::Success(_) => {
            info!(
                target = %target.name,
                elapsed_ms = elapsed.as_millis() as u64,
                "Backend answered"
            );
        }
        CallOutcome::Timeout => {
            warn!(
                target = %target.name,
                elapsed_ms = elapsed.as_millis() as u64,
                "Backend call timed out"
            );
        }
        CallOutcome::Error(reason) => {
            warn!(
                target = %target.name,
                elapsed_ms = elapsed.as_millis() as u64,
                %reason,
                "Backend call failed"
            );
        }
    }

    CallResult {
        target,
        outcome,
        elapsed,
    }
}

/// Handle set for the in-flight calls of one dispatch
pub struct InFlight {
    rx: mpsc::Receiver<CallResult>,
    dispatched: usize,
    started: Instant,
}

impl InFlight {
    /// Number of calls fanned out
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// When the fan-out started
    pub fn started(&self) -> Instant {
        self.started
    }
}

/// Fan one request out to every backend concurrently.
///
/// Each call runs in its own task and reports into a fan-in channel
/// sized to the dispatch count, so a completion never blocks and is
/// never lost, even after the aggregator has stopped receiving. Pure
/// scatter: returns immediately with the handle set.
pub fn dispatch(
    backends: &[Arc<dyn PredictBackend>],
    features: &FeatureVector,
    call_timeout: Duration,
) -> InFlight {
    let (tx, rx) = mpsc::channel(backends.len().max(1));
    let started = Instant::now();

    for backend in backends {
        let backend = Arc::clone(backend);
        let features = *features;
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = execute_call(backend.as_ref(), &features, call_timeout).await;
            // The receiver may be gone once the aggregate deadline has
            // passed; a late result is dropped unobserved.
            let _ = tx.send(result).await;
        });
    }

    InFlight {
        rx,
        dispatched: backends.len(),
        started,
    }
}

/// Collect completions until every call has reported or the aggregate
/// deadline elapses, whichever comes first.
///
/// Results are observed in true completion order. Hitting the deadline
/// is a soft cutoff: it is logged as a warning and whatever was
/// collected so far is returned; results already produced are never
/// discarded.
pub async fn collect(mut in_flight: InFlight, total_deadline: Duration) -> AggregateOutcome {
    let deadline = in_flight.started + total_deadline;
    let dispatched = in_flight.dispatched;
    let mut results = Vec::with_capacity(dispatched);
    let mut deadline_hit = false;

    while results.len() < dispatched {
        match tokio::time::timeout_at(deadline, in_flight.rx.recv()).await {
            Ok(Some(result)) => results.push(result),
            // No sender left: nothing more will arrive.
            Ok(None) => break,
            Err(_) => {
                warn!(
                    collected = results.len(),
                    dispatched,
                    deadline_ms = total_deadline.as_millis() as u64,
                    "Aggregate deadline exceeded, returning partial results"
                );
                deadline_hit = true;
                break;
            }
        }
    }

    AggregateOutcome::new(results, dispatched, deadline_hit)
}

/// The race coordinator.
///
/// Fans one inference request out to every registered backend, gathers
/// completions under the aggregate deadline, and reduces them to a
/// single decision via the selection policy.
pub struct Elector {
    backends: Vec<Arc<dyn PredictBackend>>,
    config: RaceConfig,
}

impl Elector {
    /// Create an elector over a backend set.
    ///
    /// The registry rules apply: at least one backend, unique names,
    /// exactly one primary.
    pub fn new(
        backends: Vec<Arc<dyn PredictBackend>>,
        config: RaceConfig,
    ) -> Result<Self, RegistryError> {
        let targets: Vec<BackendTarget> = backends.iter().map(|b| b.target().clone()).collect();
        StaticTargets::new(targets)?;

        Ok(Self { backends, config })
    }

    /// The race timing budget
    pub fn config(&self) -> RaceConfig {
        self.config
    }

    /// Registered targets, in dispatch order
    pub fn targets(&self) -> Vec<BackendTarget> {
        self.backends.iter().map(|b| b.target().clone()).collect()
    }

    /// Run one election for a feature vector.
    pub async fn elect(&self, features: &FeatureVector) -> Decision {
        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            backends = self.backends.len(),
            "Dispatching prediction race"
        );

        let in_flight = dispatch(&self.backends, features, self.config.call_timeout);
        let elapsed_from = in_flight.started();
        let outcome = collect(in_flight, self.config.total_deadline).await;
        let decision = decide(&outcome);

        let elapsed_ms = elapsed_from.elapsed().as_millis() as u64;
        match &decision {
            Decision::Selected { target, .. } => {
                info!(
                    %request_id,
                    winner = %target.name,
                    collected = outcome.len(),
                    dispatched = outcome.dispatched(),
                    elapsed_ms,
                    "Election resolved"
                );
            }
            Decision::NoBackendAvailable => {
                warn!(
                    %request_id,
                    collected = outcome.len(),
                    dispatched = outcome.dispatched(),
                    elapsed_ms,
                    "Election resolved without a successful backend"
                );
            }
        }

        decision
    }
}
