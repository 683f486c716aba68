//! Error types for the survey API client.
//!
//! # Design
//! Every operation fails with exactly one `ApiError`. Argument problems are
//! caught before any request is built. Transport faults arrive as a single
//! `TransportError` whose message is the innermost cause of whatever error
//! chain the HTTP library produced, so callers never unwrap nested faults.
//! `NotFound` gets a dedicated variant because callers frequently
//! distinguish "the resource does not exist" from other statuses.

use std::error::Error as StdError;

use thiserror::Error;

/// A network-level failure reported by an `HttpTransport`, flattened to one
/// cause.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Collapse an error and its `source()` chain into its innermost cause.
    pub fn flatten(err: &(dyn StdError + 'static)) -> Self {
        let mut cause = err;
        while let Some(next) = cause.source() {
            cause = next;
        }
        Self::new(cause.to_string())
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required argument was absent or blank. Raised before any request.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        name: &'static str,
        reason: &'static str,
    },

    /// The client could not be configured (bad server URI, bad env value).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The transport could not complete the round-trip.
    #[error("transport failed: {0}")]
    Transport(#[from] TransportError),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

impl ApiError {
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, ApiError::InvalidArgument { .. })
    }
}
