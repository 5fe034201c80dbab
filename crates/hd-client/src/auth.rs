//! Credentials and `Authorization` header construction.
//!
//! Sensitive fields are redacted in Debug output.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::{Error, ErrorKind, Result};

/// Credential material for one client.
///
/// A password selects HTTP Basic `username:password`; otherwise the API
/// token selects Basic `username/token:<token>`. OAuth mode overrides both
/// and sends the token as a bearer credential.
#[derive(Clone, Default)]
pub struct Credentials {
    username: String,
    password: Option<String>,
    token: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// The authentication scheme a set of credentials resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>`.
    Bearer,
    /// `Authorization: Basic base64(username:password)`.
    BasicPassword,
    /// `Authorization: Basic base64(username/token:token)`.
    BasicToken,
}

impl Credentials {
    /// Username + password credentials.
    pub fn with_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: Some(password.into()),
            token: None,
        }
    }

    /// Username + API token credentials.
    pub fn with_token(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: None,
            token: Some(token.into()),
        }
    }

    /// Credentials for OAuth mode, where only the access token matters.
    pub fn oauth(token: impl Into<String>) -> Self {
        Self::with_token(String::new(), token)
    }

    /// Add an API token alongside an existing password.
    pub fn and_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns true if a password is configured.
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// Returns true if an API token is configured.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Resolve the scheme for the given OAuth flag.
    pub fn scheme(&self, oauth: bool) -> Result<AuthScheme> {
        if oauth {
            return match self.token {
                Some(_) => Ok(AuthScheme::Bearer),
                None => Err(Error::new(ErrorKind::Config(
                    "OAuth mode requires an access token".to_string(),
                ))),
            };
        }

        match (&self.password, &self.token) {
            (Some(_), _) => Ok(AuthScheme::BasicPassword),
            (None, Some(_)) => Ok(AuthScheme::BasicToken),
            (None, None) => Err(Error::new(ErrorKind::Config(
                "either a password or an API token is required".to_string(),
            ))),
        }
    }

    /// Compute the `Authorization` header value.
    pub fn authorization(&self, oauth: bool) -> Result<String> {
        let header = match self.scheme(oauth)? {
            AuthScheme::Bearer => format!("Bearer {}", self.token.as_deref().unwrap_or_default()),
            AuthScheme::BasicPassword => basic(&format!(
                "{}:{}",
                self.username,
                self.password.as_deref().unwrap_or_default()
            )),
            AuthScheme::BasicToken => basic(&format!(
                "{}/token:{}",
                self.username,
                self.token.as_deref().unwrap_or_default()
            )),
        };
        Ok(header)
    }
}

fn basic(pair: &str) -> String {
    format!("Basic {}", STANDARD.encode(pair))
}
