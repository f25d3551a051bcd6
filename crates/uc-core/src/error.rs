//! Base error type.
//!
//! Higher crates wrap `CoreError` as one variant of their own enums via
//! `#[from]`.

use thiserror::Error;

/// Errors raised while building times, distributions, or parameters.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("invalid simulation time {0}: must be finite and non-negative")]
    InvalidTime(f64),

    #[error("parameter parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `uc-core`.
pub type CoreResult<T> = Result<T, CoreError>;
