//! The transport seam: anything that can turn a [`RequestDescriptor`] into a
//! [`RawResponse`].

use std::collections::HashMap;

use async_trait::async_trait;
use tokio_util::io::ReaderStream;

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestDescriptor};
use crate::response::RawResponse;

/// Sends one request and returns the raw outcome.
///
/// Connection pooling, TLS and proxying are the implementation's concern.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch a request.
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    inner: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(config.accept_compressed)
            .deflate(config.accept_compressed);

        if let Some(ref proxy) = config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;
            builder = builder.proxy(proxy);
        }

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self { inner })
    }

    /// Wrap an existing reqwest client.
    pub fn from_client(inner: reqwest::Client) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: RequestDescriptor) -> Result<RawResponse> {
        let mut req = self
            .inner
            .request(request.method.to_reqwest(), &request.url);

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(body) = request.body {
            req = match body {
                RequestBody::Json(bytes) => req.body(bytes),
                RequestBody::File(path) => {
                    let file = tokio::fs::File::open(&path).await?;
                    let length = file.metadata().await?.len();
                    req.header("Content-Length", length.to_string())
                        .body(reqwest::Body::wrap_stream(ReaderStream::new(file)))
                }
            };
        }

        let response = req.send().await?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, headers, body))
    }
}
