//! Error types for userdir.
//!
//! Fetch failures and render failures are kept as separate enums because they
//! are recovered at different places: fetch errors at the list engine, render
//! errors at the crash isolation boundary.

use thiserror::Error;

/// The unified error type for userdir operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A page fetch failed.
    #[error("fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Producing a view from a snapshot failed.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Input validation errors (endpoint URL, page numbers).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

/// Failure of a single remote directory fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// No connectivity, DNS, TLS, timeout or any other transport failure.
    #[error("network failure: {message}")]
    Network { message: String },

    /// The server answered with a non-success status.
    #[error("HTTP {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    HttpStatus {
        status: u16,
        message: Option<String>,
    },

    /// The payload did not match the expected envelope.
    #[error("malformed payload: {message}")]
    Decode { message: String },
}

impl FetchError {
    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure raised while producing a view from a `VisibleListState`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The renderer reported an error.
    #[error("{message}")]
    Failed { message: String },

    /// The renderer panicked.
    #[error("renderer panicked: {message}")]
    Panicked { message: String },
}

impl RenderError {
    /// Create a reported render failure.
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    /// The message shown next to the fallback view.
    pub fn message(&self) -> &str {
        match self {
            Self::Failed { message } | Self::Panicked { message } => message,
        }
    }
}

impl From<std::fmt::Error> for RenderError {
    fn from(_: std::fmt::Error) -> Self {
        Self::failed("formatter error")
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid directory endpoint URL.
    #[error("invalid endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },
}
