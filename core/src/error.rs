//! Error types for the Harvest API client.
//!
//! # Design
//! Validation failures (`MissingArgument`, `InvalidArgument`) are raised
//! before any request is built. `Runtime` covers responses that arrive fine
//! but do not have the expected shape. Everything the transport or the server
//! reports is passed through untouched; the client never retries.

use thiserror::Error;

/// Boxed error returned by a `Transport` implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors returned by every resource client operation.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// A required payload field was absent. Carries the field name.
    #[error("missing argument: {0}")]
    MissingArgument(String),

    /// A field or filter value failed a type, emptiness, or enum check.
    #[error("{0}")]
    InvalidArgument(String),

    /// The response did not have the expected shape.
    #[error("{0}")]
    Runtime(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The transport failed before a response was received.
    #[error("transport failed: {0}")]
    Transport(#[source] BoxError),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl HarvestError {
    pub(crate) fn unexpected_result() -> Self {
        HarvestError::Runtime("Unexpected result.".to_string())
    }
}

pub type Result<T> = std::result::Result<T, HarvestError>;
