//! Common error types for prediction backends and target resolution

use thiserror::Error;

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Errors a single backend call can produce.
///
/// These never unwind past the call executor; the race layer folds each
/// of them into a tagged call result.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connection refused, DNS, broken pipe)
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status
    #[error("backend returned HTTP {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// The call did not complete in time
    #[error("call timed out")]
    Timeout,
}

/// Errors resolving the backend target registry
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No targets configured at all
    #[error("no backend targets configured")]
    Empty,

    /// No target marked primary
    #[error("no primary target configured")]
    NoPrimary,

    /// More than one target marked primary
    #[error("multiple primary targets configured: '{0}' and '{1}'")]
    MultiplePrimaries(String, String),

    /// Two targets share a name
    #[error("duplicate target name: '{0}'")]
    DuplicateName(String),

    /// Base URL does not parse
    #[error("invalid base URL for target '{name}': {reason}")]
    InvalidBaseUrl {
        /// Target the URL belongs to
        name: String,
        /// Parse failure detail
        reason: String,
    },
}
