//! Request executor: authenticated dispatch, classification and side-loading.

use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::hooks::Observer;
use crate::path::PathSpec;
use crate::profile::CallOptions;
use crate::request::{RequestBody, RequestDescriptor, RequestMethod};
use crate::response::{classify, select_primary, RawResponse};
use crate::retry::RetryPolicy;
use crate::sideload;
use crate::throttle::Throttle;
use crate::transport::{ReqwestTransport, Transport};

/// Result of one successful call.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Primary payload with side-loads applied.
    pub body: Value,
    /// The response as the transport returned it.
    pub raw: RawResponse,
    /// The full decoded body (`null` when it was not JSON).
    pub envelope: Value,
}

impl ApiResponse {
    /// Deserialize the primary payload.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(self.body.clone()).map_err(Into::into)
    }

    /// The `next_page` cursor, if the server sent a usable one.
    pub fn next_page(&self) -> Option<&str> {
        self.envelope
            .get("next_page")
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())
    }
}

/// HTTP client for the Helpdesk API.
///
/// Cheap to clone; clones share the transport, throttle and observer.
///
/// # Example
///
/// ```rust,ignore
/// use busbar_hd_client::{CallOptions, ClientConfig, Credentials, HelpdeskClient, PathSpec};
///
/// let config = ClientConfig::builder(
///     "https://acme.helpdesk.test/api/v2",
///     Credentials::with_token("agent@acme.test", "api-token"),
/// )
/// .build()?;
/// let client = HelpdeskClient::new(config)?;
///
/// let ticket = client
///     .get(PathSpec::segments(["tickets", "42"]), &CallOptions::default())
///     .await?;
/// println!("{}", ticket.body["ticket"]["subject"]);
/// ```
#[derive(Clone)]
pub struct HelpdeskClient {
    transport: Arc<dyn Transport>,
    config: Arc<ClientConfig>,
    throttle: Option<Arc<Throttle>>,
    observer: Option<Arc<dyn Observer>>,
}

impl std::fmt::Debug for HelpdeskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HelpdeskClient")
            .field("config", &self.config)
            .field("throttle", &self.throttle)
            .field("observer", &self.observer.as_ref().map(|_| "Observer"))
            .finish_non_exhaustive()
    }
}

impl HelpdeskClient {
    /// Create a client using the default `reqwest` transport.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        let throttle = config.throttle.map(|interval| Arc::new(Throttle::new(interval)));
        Ok(Self {
            transport,
            config: Arc::new(config),
            throttle,
            observer: None,
        })
    }

    /// Install an observer for the request/response hooks.
    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Assemble the URL a call would hit.
    pub fn url(&self, path: &PathSpec, options: &CallOptions) -> Result<String> {
        path.assemble(&self.config.remote_uri, self.include(options))
    }

    fn include<'a>(&'a self, options: &'a CallOptions) -> &'a [String] {
        options.include.as_deref().unwrap_or(&self.config.include)
    }

    // =========================================================================
    // Execution
    // =========================================================================

    /// Execute one JSON request.
    ///
    /// Non-GET requests without a body send `{}`.
    #[instrument(skip_all, fields(method = %method))]
    pub async fn execute(
        &self,
        method: RequestMethod,
        path: impl Into<PathSpec>,
        body: Option<Value>,
        options: &CallOptions,
    ) -> Result<ApiResponse> {
        let body = match body {
            Some(value) => Some(serde_json::to_vec(&value)?),
            None if !matches!(method, RequestMethod::Get | RequestMethod::Head) => {
                Some(b"{}".to_vec())
            }
            None => None,
        };
        let request = self.describe(method, &path.into(), options, "application/json")?;
        let request = match body {
            Some(bytes) => request.body(RequestBody::Json(bytes)),
            None => request,
        };
        self.dispatch(request, options).await
    }

    /// Upload a file as `application/binary`.
    ///
    /// The file is streamed from disk; the response is handled exactly like a
    /// JSON call.
    #[instrument(skip_all, fields(file = %file.as_ref().display()))]
    pub async fn upload(
        &self,
        path: impl Into<PathSpec>,
        file: impl AsRef<Path>,
        options: &CallOptions,
    ) -> Result<ApiResponse> {
        let request = self
            .describe(RequestMethod::Post, &path.into(), options, "application/binary")?
            .body(RequestBody::File(file.as_ref().to_path_buf()));
        self.dispatch(request, options).await
    }

    /// GET request.
    pub async fn get(&self, path: impl Into<PathSpec>, options: &CallOptions) -> Result<ApiResponse> {
        self.execute(RequestMethod::Get, path, None, options).await
    }

    /// POST request with a serializable body.
    pub async fn post<B: Serialize>(
        &self,
        path: impl Into<PathSpec>,
        body: &B,
        options: &CallOptions,
    ) -> Result<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.execute(RequestMethod::Post, path, Some(body), options).await
    }

    /// PUT request with a serializable body.
    pub async fn put<B: Serialize>(
        &self,
        path: impl Into<PathSpec>,
        body: &B,
        options: &CallOptions,
    ) -> Result<ApiResponse> {
        let body = serde_json::to_value(body)?;
        self.execute(RequestMethod::Put, path, Some(body), options).await
    }

    /// DELETE request.
    pub async fn delete(
        &self,
        path: impl Into<PathSpec>,
        options: &CallOptions,
    ) -> Result<ApiResponse> {
        self.execute(RequestMethod::Delete, path, None, options).await
    }

    fn describe(
        &self,
        method: RequestMethod,
        path: &PathSpec,
        options: &CallOptions,
        content_type: &str,
    ) -> Result<RequestDescriptor> {
        let url = self.url(path, options)?;
        let authorization = self.config.credentials.authorization(self.config.oauth)?;

        Ok(RequestDescriptor::new(method, url)
            .header("Content-Type", content_type)
            .header("Accept", "application/json")
            .header("User-Agent", self.config.user_agent.as_str())
            .header("Authorization", authorization))
    }

    /// Send with the throttle and (if configured) retry decorators applied.
    async fn dispatch(&self, request: RequestDescriptor, options: &CallOptions) -> Result<ApiResponse> {
        let mut retry_policy = self.config.retry.clone().map(RetryPolicy::new);

        loop {
            if let Some(ref throttle) = self.throttle {
                throttle.acquire().await;
            }

            let err = match self.dispatch_once(request.clone(), options).await {
                Ok(response) => return Ok(response),
                Err(err) => err,
            };

            let Some(ref mut policy) = retry_policy else {
                return Err(err);
            };
            if !policy.accepts(&err) {
                return Err(err);
            }

            match policy.next_delay(err.retry_after()) {
                Some(delay) => {
                    warn!(
                        attempt = policy.attempt(),
                        delay_ms = delay.as_millis(),
                        error = %err,
                        "Request failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => {
                    return Err(Error::with_source(
                        ErrorKind::RetriesExhausted {
                            attempts: policy.attempt(),
                        },
                        err,
                    ));
                }
            }
        }
    }

    async fn dispatch_once(
        &self,
        request: RequestDescriptor,
        options: &CallOptions,
    ) -> Result<ApiResponse> {
        if let Some(ref observer) = self.observer {
            observer.on_request(&request);
        }
        if self.config.enable_tracing {
            debug!(method = %request.method, url = %request.url, "Sending request");
        }

        let result = self
            .transport
            .send(request)
            .await
            .and_then(|raw| self.interpret(raw, options));

        match &result {
            Ok(response) => {
                if self.config.enable_tracing {
                    debug!(status = response.status, "Response received");
                }
                if let Some(ref observer) = self.observer {
                    observer.on_response(response);
                }
            }
            Err(err) => {
                if self.config.enable_tracing {
                    info!(status = ?err.status(), error = %err, "Request failed");
                }
                if let Some(ref observer) = self.observer {
                    observer.on_error(err);
                }
            }
        }

        result
    }

    fn interpret(&self, raw: RawResponse, options: &CallOptions) -> Result<ApiResponse> {
        let (status, envelope) = classify(&raw, self.config.status_policy).into_result()?;

        let mut body = select_primary(&envelope, options.envelope_keys());
        sideload::resolve(&mut body, &envelope, options.sideloads());

        Ok(ApiResponse {
            status,
            body,
            raw,
            envelope,
        })
    }
}
