//! Client configuration.

use std::time::Duration;

use crate::auth::Credentials;
use crate::error::{Error, ErrorKind, Result};
use crate::response::StatusPolicy;
use crate::retry::RetryConfig;

/// Immutable per-client settings.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address every assembled endpoint hangs off, e.g.
    /// `https://acme.helpdesk.test/api/v2`.
    pub remote_uri: String,
    /// Credential material.
    pub credentials: Credentials,
    /// Send the token as an OAuth bearer credential.
    pub oauth: bool,
    /// Optional proxy URL for all traffic.
    pub proxy: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Negotiate gzip/deflate response encoding.
    pub accept_compressed: bool,
    /// User-Agent header value.
    pub user_agent: String,
    /// Side-load names requested when a call does not pass its own list.
    pub include: Vec<String>,
    /// Minimum spacing between two dispatches.
    pub throttle: Option<Duration>,
    /// Retry decorator; off unless configured.
    pub retry: Option<RetryConfig>,
    /// Whether the failure-code table is consulted.
    pub status_policy: StatusPolicy,
    /// Whether to emit request/response tracing events.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            remote_uri: String::new(),
            credentials: Credentials::default(),
            oauth: false,
            proxy: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            accept_compressed: true,
            user_agent: crate::user_agent(),
            include: Vec::new(),
            throttle: None,
            retry: None,
            status_policy: StatusPolicy::default(),
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder(remote_uri: impl Into<String>, credentials: Credentials) -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: ClientConfig {
                remote_uri: remote_uri.into(),
                credentials,
                ..ClientConfig::default()
            },
        }
    }

    /// Load configuration from `HELPDESK_*` environment variables.
    ///
    /// Required: `HELPDESK_REMOTE_URI` and either `HELPDESK_PASSWORD` or
    /// `HELPDESK_TOKEN` (plus `HELPDESK_USERNAME` outside OAuth mode).
    /// Optional: `HELPDESK_OAUTH`, `HELPDESK_PROXY`, `HELPDESK_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let remote_uri = var("HELPDESK_REMOTE_URI").ok_or_else(|| {
            Error::new(ErrorKind::Config("HELPDESK_REMOTE_URI is not set".to_string()))
        })?;
        let username = var("HELPDESK_USERNAME").unwrap_or_default();
        let oauth = var("HELPDESK_OAUTH")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let credentials = match (var("HELPDESK_PASSWORD"), var("HELPDESK_TOKEN")) {
            (Some(password), Some(token)) => {
                Credentials::with_password(username, password).and_token(token)
            }
            (Some(password), None) => Credentials::with_password(username, password),
            (None, Some(token)) => Credentials::with_token(username, token),
            (None, None) => {
                return Err(Error::new(ErrorKind::Config(
                    "HELPDESK_PASSWORD or HELPDESK_TOKEN must be set".to_string(),
                )))
            }
        };

        let mut builder = ClientConfig::builder(remote_uri, credentials).with_oauth(oauth);
        if let Some(proxy) = var("HELPDESK_PROXY") {
            builder = builder.with_proxy(proxy);
        }
        if let Some(secs) = var("HELPDESK_TIMEOUT_SECS") {
            let secs = secs.parse::<u64>().map_err(|e| {
                Error::with_source(
                    ErrorKind::Config(format!("HELPDESK_TIMEOUT_SECS is not a number: {}", secs)),
                    e,
                )
            })?;
            builder = builder.with_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    /// Validate the settings.
    pub fn validate(&self) -> Result<()> {
        let parsed = url::Url::parse(&self.remote_uri)?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::new(ErrorKind::Config(format!(
                "remote URI must be http(s), got {}",
                parsed.scheme()
            ))));
        }
        if !self.oauth && self.credentials.username().is_empty() {
            return Err(Error::new(ErrorKind::Config(
                "a username is required outside OAuth mode".to_string(),
            )));
        }
        self.credentials.scheme(self.oauth)?;
        Ok(())
    }
}

/// Builder for ClientConfig.
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Enable or disable OAuth mode.
    pub fn with_oauth(mut self, oauth: bool) -> Self {
        self.config.oauth = oauth;
        self
    }

    /// Route traffic through a proxy.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config.proxy = Some(proxy.into());
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Enable or disable compressed responses.
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.config.accept_compressed = enabled;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the default side-load list.
    pub fn with_include<I, S>(mut self, include: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.include = include.into_iter().map(Into::into).collect();
        self
    }

    /// Space dispatches at least `interval` apart.
    pub fn with_throttle(mut self, interval: Duration) -> Self {
        self.config.throttle = Some(interval);
        self
    }

    /// Enable the retry decorator.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.config.retry = Some(retry);
        self
    }

    /// Disable retries.
    pub fn without_retry(mut self) -> Self {
        self.config.retry = None;
        self
    }

    /// Choose how known failure codes are treated.
    pub fn with_status_policy(mut self, policy: StatusPolicy) -> Self {
        self.config.status_policy = policy;
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Validate and build the client configuration.
    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
