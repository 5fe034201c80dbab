//! Raw responses and their classification.
//!
//! Classification order matters: an absent body wins over everything, a
//! `retry-after` header wins over the status table, and the status table wins
//! over body decoding.

use std::collections::HashMap;
use std::sync::LazyLock;
use std::time::Duration;

use bytes::Bytes;
use serde_json::Value;
use tracing::warn;

use crate::error::{Error, ErrorKind, Result, ERROR_LABEL};

/// Status code, headers and body exactly as the transport produced them.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    /// Header names are stored lower-cased.
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl RawResponse {
    /// Create a raw response, normalizing header names.
    pub fn new(status: u16, headers: HashMap<String, String>, body: impl Into<Bytes>) -> Self {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Get a header value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Get the body as (lossy) text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Returns true if the response status is successful (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the `retry-after` header as a Duration.
    ///
    /// Accepts delta-seconds or an HTTP-date.
    pub fn retry_after(&self) -> Option<Duration> {
        parse_retry_after(self.header("retry-after")?)
    }
}

/// Parse a `retry-after` value.
pub fn parse_retry_after(value: &str) -> Option<Duration> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Some(Duration::from_secs(seconds));
    }

    let when = chrono::DateTime::parse_from_rfc2822(value).ok()?;
    let wait = when.signed_duration_since(chrono::Utc::now());
    Some(wait.to_std().unwrap_or(Duration::ZERO))
}

/// Status codes the API documents as failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureCode {
    BadRequest,
    NotAuthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    Conflict,
    UnprocessableEntity,
    TooManyRequests,
    InternalServerError,
    ServiceUnavailable,
}

impl FailureCode {
    /// Look up a status code in the failure table.
    pub fn from_status(status: u16) -> Option<Self> {
        let code = match status {
            400 => FailureCode::BadRequest,
            401 => FailureCode::NotAuthorized,
            403 => FailureCode::Forbidden,
            404 => FailureCode::NotFound,
            405 => FailureCode::MethodNotAllowed,
            409 => FailureCode::Conflict,
            422 => FailureCode::UnprocessableEntity,
            429 => FailureCode::TooManyRequests,
            500 => FailureCode::InternalServerError,
            503 => FailureCode::ServiceUnavailable,
            _ => return None,
        };
        Some(code)
    }

    /// The numeric status.
    pub fn status(&self) -> u16 {
        match self {
            FailureCode::BadRequest => 400,
            FailureCode::NotAuthorized => 401,
            FailureCode::Forbidden => 403,
            FailureCode::NotFound => 404,
            FailureCode::MethodNotAllowed => 405,
            FailureCode::Conflict => 409,
            FailureCode::UnprocessableEntity => 422,
            FailureCode::TooManyRequests => 429,
            FailureCode::InternalServerError => 500,
            FailureCode::ServiceUnavailable => 503,
        }
    }

    /// Description text, verbatim from the API documentation.
    pub fn description(&self) -> &'static str {
        match self {
            FailureCode::BadRequest => "Bad Request",
            FailureCode::NotAuthorized => "Not Authorized",
            FailureCode::Forbidden => "Forbidden",
            FailureCode::NotFound => "Item not found",
            FailureCode::MethodNotAllowed => "Method not Allowed",
            FailureCode::Conflict => "Conflict",
            FailureCode::UnprocessableEntity => "Unprocessable Entity",
            FailureCode::TooManyRequests => "Too Many Requests",
            FailureCode::InternalServerError => "Internal Server Error",
            FailureCode::ServiceUnavailable => "Service Unavailable",
        }
    }

    /// Full error message, `"<label> (<code>): <description>"`.
    pub fn message(&self) -> String {
        format!("{} ({}): {}", ERROR_LABEL, self.status(), self.description())
    }

    /// Worth retrying by the opt-in retry decorator.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            FailureCode::TooManyRequests
                | FailureCode::InternalServerError
                | FailureCode::ServiceUnavailable
        )
    }
}

/// Whether the failure table is consulted during classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Known failure codes become [`Outcome::HttpError`].
    #[default]
    Enforce,
    /// The failure table is never consulted; bodies of failing responses are
    /// decoded and returned like any other.
    Lenient,
}

/// The interpretation of one raw response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success {
        status: u16,
        body: Value,
    },
    EmptyResult,
    RateLimited {
        status: u16,
        retry_after: Option<Duration>,
        body: Option<Value>,
    },
    HttpError {
        status: u16,
        code: FailureCode,
        body: Option<Value>,
    },
    /// The body was not JSON; the payload degrades to `null`.
    ParseError {
        status: u16,
        raw: String,
    },
}

/// Interpret a raw response.
pub fn classify(raw: &RawResponse, policy: StatusPolicy) -> Outcome {
    if raw.body.is_empty() {
        return Outcome::EmptyResult;
    }

    if let Some(value) = raw.header("retry-after") {
        return Outcome::RateLimited {
            status: raw.status,
            retry_after: parse_retry_after(value),
            body: serde_json::from_slice(&raw.body).ok(),
        };
    }

    if policy == StatusPolicy::Enforce {
        if let Some(code) = FailureCode::from_status(raw.status) {
            return Outcome::HttpError {
                status: raw.status,
                code,
                body: serde_json::from_slice(&raw.body).ok(),
            };
        }
    }

    match serde_json::from_slice::<Value>(&raw.body) {
        Ok(body) => Outcome::Success {
            status: raw.status,
            body,
        },
        Err(_) => Outcome::ParseError {
            status: raw.status,
            raw: raw.text(),
        },
    }
}

impl Outcome {
    /// Collapse into the status and decoded payload, or the error it signals.
    pub fn into_result(self) -> Result<(u16, Value)> {
        match self {
            Outcome::Success { status, body } => Ok((status, body)),
            Outcome::ParseError { status, raw } => {
                warn!(
                    status,
                    body = %sanitize_error_message(&raw),
                    "Response body is not JSON, continuing with null payload"
                );
                Ok((status, Value::Null))
            }
            Outcome::EmptyResult => Err(Error::new(ErrorKind::EmptyResult)),
            Outcome::RateLimited {
                status,
                retry_after,
                body,
            } => Err(Error::new(ErrorKind::RateLimited {
                status,
                retry_after,
                body,
            })),
            Outcome::HttpError { status, code, body } => {
                Err(Error::new(ErrorKind::HttpStatus { status, code, body }))
            }
        }
    }
}

/// Pick the primary payload out of a decoded envelope.
///
/// The first candidate key present at the top level wins; with no match the
/// whole envelope is the payload.
pub fn select_primary(envelope: &Value, keys: &[String]) -> Value {
    keys.iter()
        .find_map(|key| envelope.get(key))
        .unwrap_or(envelope)
        .clone()
}

static TOKEN_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r"(Bearer|Basic)\s+[A-Za-z0-9+/=._~-]+").expect("valid token pattern")
});

static SECRET_FIELD_PATTERN: LazyLock<regex_lite::Regex> = LazyLock::new(|| {
    regex_lite::Regex::new(r#""(access_token|token|password)"\s*:\s*"[^"]*""#)
        .expect("valid secret field pattern")
});

/// Sanitize a response body before it is logged.
///
/// Redacts credentials and truncates to 500 characters.
pub fn sanitize_error_message(message: &str) -> String {
    const MAX_LENGTH: usize = 500;

    let sanitized = TOKEN_PATTERN.replace_all(message, "$1 [REDACTED]");
    let mut sanitized = SECRET_FIELD_PATTERN
        .replace_all(&sanitized, r#""$1":"[REDACTED]""#)
        .into_owned();

    if sanitized.len() > MAX_LENGTH {
        let mut cut = MAX_LENGTH;
        while !sanitized.is_char_boundary(cut) {
            cut -= 1;
        }
        sanitized.truncate(cut);
        sanitized.push_str("...[truncated]");
    }

    sanitized
}
