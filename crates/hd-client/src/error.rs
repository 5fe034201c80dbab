//! Error types for hd-client.

use std::time::Duration;

use serde_json::Value;

use crate::response::FailureCode;

/// Result type alias for hd-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Label used as the prefix of every API-level error message.
pub const ERROR_LABEL: &str = "Helpdesk Error";

/// Error type for hd-client operations.
#[derive(Debug, thiserror::Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self { kind, source: None }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            source: Some(Box::new(source)),
        }
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.kind, ErrorKind::RateLimited { .. })
    }

    /// Returns true if the server answered without any body.
    pub fn is_empty_result(&self) -> bool {
        matches!(self.kind, ErrorKind::EmptyResult)
    }

    /// Returns the retry-after duration if this is a rate limit error.
    pub fn retry_after(&self) -> Option<Duration> {
        match &self.kind {
            ErrorKind::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// HTTP status associated with the error, when there is one.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::EmptyResult => Some(204),
            ErrorKind::RateLimited { status, .. } => Some(*status),
            ErrorKind::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Decoded response body carried by the error, if any.
    pub fn body(&self) -> Option<&Value> {
        match &self.kind {
            ErrorKind::RateLimited { body, .. } => body.as_ref(),
            ErrorKind::HttpStatus { body, .. } => body.as_ref(),
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Any other failure reported by the transport.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response carried no body at all.
    #[error("Helpdesk Error (204): empty result")]
    EmptyResult,

    /// The response carried a `retry-after` header.
    #[error(
        "Helpdesk Error ({status}): rate limited{}",
        .retry_after.map(|d| format!(", retry after {:?}", d)).unwrap_or_default()
    )]
    RateLimited {
        status: u16,
        retry_after: Option<Duration>,
        body: Option<Value>,
    },

    /// The response status is one of the known failure codes.
    #[error("Helpdesk Error ({status}): {}", .code.description())]
    HttpStatus {
        status: u16,
        code: FailureCode,
        body: Option<Value>,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Reading an upload source failed.
    #[error("I/O error: {0}")]
    Io(String),

    /// All retries exhausted.
    #[error("All {attempts} retry attempts exhausted")]
    RetriesExhausted { attempts: u32 },
}

impl ErrorKind {
    /// Returns true if this error kind is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::RateLimited { .. } => true,
            ErrorKind::Timeout => true,
            ErrorKind::Connection(_) => true,
            ErrorKind::HttpStatus { code, .. } => code.is_transient(),
            _ => false,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            ErrorKind::Timeout
        } else if err.is_connect() {
            ErrorKind::Connection(err.to_string())
        } else {
            ErrorKind::Transport(err.to_string())
        };

        Error::with_source(kind, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::with_source(ErrorKind::Json(err.to_string()), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::InvalidUrl(err.to_string()), err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::with_source(ErrorKind::Io(err.to_string()), err)
    }
}
