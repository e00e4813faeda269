//! Error Types
//!
//! This module defines the error types used across the library.
//!
//! # Error Categories
//!
//! - [`Error`] - top-level error for service and coordinator callers
//! - [`BackendError`] - failures talking to the remote table store
//!
//! Individual mutation failures never surface through these types to UI
//! callers: the sync coordinator absorbs them and reports queueing state
//! instead. Only infrastructure-level faults (configuration, local storage,
//! validation) propagate as `Error`.
//!
//! # Thread Safety
//!
//! All error types are `Send + Sync` and can be safely shared across thread
//! boundaries.

use thiserror::Error;

use crate::config::ConfigError;

/// Top-level error type for library operations
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Local queue storage fault
    #[error("queue storage error: {0}")]
    Store(#[from] sqlx::Error),

    /// Remote table store failure
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// Data validation failure
    #[error("validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl Error {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors from the remote table store boundary
///
/// The coordinator converts all of these to a boolean "handled" signal when
/// deciding queueing behaviour; they are only visible as typed errors on the
/// direct read path.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (DNS, connect, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// The backend rejected the request
    #[error("backend rejected request ({status}): {body}")]
    Rejected {
        /// HTTP status code
        status: u16,
        /// Response body, if any
        body: String,
    },

    /// The response could not be decoded
    #[error("failed to decode backend response: {0}")]
    Decode(String),

    /// No session is available for an authenticated call
    #[error("not authenticated")]
    NotAuthenticated,
}

impl BackendError {
    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create a new decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}
