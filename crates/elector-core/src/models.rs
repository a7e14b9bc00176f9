//! Data model for the election race

use std::time::Duration;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// One resolved backend predictor target
///
/// Immutable after resolution; exactly one target per registry is primary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendTarget {
    /// Unique name (e.g. "model", "canary")
    pub name: String,
    /// Base URL of the predictor (e.g. "http://model:5000")
    pub base_url: String,
    /// Whether this target is the preferred predictor
    #[serde(default)]
    pub is_primary: bool,
}

impl BackendTarget {
    /// Create a new target
    pub fn new(name: impl Into<String>, base_url: impl Into<String>, is_primary: bool) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            is_primary,
        }
    }
}

/// Inbound feature vector for one prediction request
///
/// Field names follow the predictor wire format (sepal/petal length and
/// width).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub s_l: f64,
    pub s_w: f64,
    pub p_l: f64,
    pub p_w: f64,
}

impl FeatureVector {
    /// True when every feature is a finite number.
    ///
    /// JSON numbers like `1e999` saturate to infinity during parsing, so
    /// this is checked at the API boundary.
    pub fn is_finite(&self) -> bool {
        self.s_l.is_finite() && self.s_w.is_finite() && self.p_l.is_finite() && self.p_w.is_finite()
    }
}

/// Terminal outcome of one dispatched call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    /// Backend answered 2xx; the raw response body
    Success(Bytes),
    /// The call exceeded the per-call timeout
    Timeout,
    /// Transport or protocol failure
    Error(String),
}

impl CallOutcome {
    /// Whether this outcome carries a payload
    pub fn is_success(&self) -> bool {
        matches!(self, CallOutcome::Success(_))
    }

    /// Short tag for log events
    pub fn kind(&self) -> &'static str {
        match self {
            CallOutcome::Success(_) => "success",
            CallOutcome::Timeout => "timeout",
            CallOutcome::Error(_) => "error",
        }
    }
}

/// Tagged result of one dispatched call, annotated with its origin and
/// elapsed duration
///
/// Exactly one is produced per dispatched call. A call abandoned at the
/// aggregate deadline is simply never observed; its result is not
/// converted into another kind.
#[derive(Debug, Clone)]
pub struct CallResult {
    /// The target that was called
    pub target: BackendTarget,
    /// What the call produced
    pub outcome: CallOutcome,
    /// Time from call start to the terminal outcome
    pub elapsed: Duration,
}

/// Call results collected before the aggregator stopped, in completion
/// order (not submission order)
#[derive(Debug, Clone)]
pub struct AggregateOutcome {
    results: Vec<CallResult>,
    dispatched: usize,
    deadline_hit: bool,
}

impl AggregateOutcome {
    /// Wrap a completion-ordered result list.
    ///
    /// `dispatched` is the number of calls fanned out; the list never
    /// holds more entries than that.
    pub fn new(results: Vec<CallResult>, dispatched: usize, deadline_hit: bool) -> Self {
        debug_assert!(results.len() <= dispatched);
        Self {
            results,
            dispatched,
            deadline_hit,
        }
    }

    /// Collected results in completion order
    pub fn results(&self) -> &[CallResult] {
        &self.results
    }

    /// Number of results collected
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True when nothing was collected
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Number of calls that were fanned out
    pub fn dispatched(&self) -> usize {
        self.dispatched
    }

    /// Whether the aggregate deadline cut collection short
    pub fn deadline_hit(&self) -> bool {
        self.deadline_hit
    }

    /// True when every dispatched call reported before collection stopped
    pub fn is_complete(&self) -> bool {
        self.results.len() == self.dispatched
    }
}

/// Final output of one election
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// A backend answered; its raw payload and identity
    Selected {
        payload: Bytes,
        target: BackendTarget,
    },
    /// No backend produced a success before collection stopped
    NoBackendAvailable,
}

impl Decision {
    /// Whether a payload was selected
    pub fn is_selected(&self) -> bool {
        matches!(self, Decision::Selected { .. })
    }
}
