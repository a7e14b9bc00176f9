//! elector-race - Race coordinator for the prediction elector
//!
//! This crate fans one inference request out to every registered backend,
//! gathers completions under an aggregate deadline, and reduces them to a
//! single decision:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                           Elector                              │
//! │                                                                │
//! │   dispatch ──► one task per backend, per-call timeout          │
//! │        │                                                       │
//! │        ▼               fan-in channel                          │
//! │   collect  ◄── results in true completion order, bounded by    │
//! │        │       the aggregate deadline                          │
//! │        ▼                                                       │
//! │   decide   ──► primary preference, first-success fallback      │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Call failures and timeouts never unwind out of the race: every
//! dispatched call is folded into a tagged [`CallResult`]
//! (`elector_core::CallResult`) and the request always resolves to a
//! [`Decision`](elector_core::Decision).

mod race;

pub use race::{collect, dispatch, execute_call, Elector, InFlight};

// Re-export core types for convenience
pub use elector_core::{AggregateOutcome, CallOutcome, CallResult, Decision, RaceConfig};
