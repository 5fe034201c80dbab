//! Pagination driver: follows `next_page` cursors until the server stops
//! sending one.

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde_json::Value;
use tracing::debug;

use crate::client::{ApiResponse, HelpdeskClient};
use crate::error::Result;
use crate::path::PathSpec;
use crate::profile::CallOptions;
use crate::request::RequestMethod;

enum Cursor {
    Start(RequestMethod, PathSpec),
    Next(String),
    Done,
}

/// Every page of a paginated call, in server order.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    /// One entry per fetched page.
    pub pages: Vec<ApiResponse>,
    /// Page payloads concatenated; array payloads are flattened one level.
    pub body: Vec<Value>,
}

impl PageSet {
    fn from_pages(pages: Vec<ApiResponse>) -> Self {
        let mut body = Vec::new();
        for page in &pages {
            match &page.body {
                Value::Array(items) => body.extend(items.iter().cloned()),
                other => body.push(other.clone()),
            }
        }
        Self { pages, body }
    }

    /// Status code of each page.
    pub fn statuses(&self) -> Vec<u16> {
        self.pages.iter().map(|page| page.status).collect()
    }

    /// Raw response of each page.
    pub fn responses(&self) -> impl Iterator<Item = &crate::response::RawResponse> {
        self.pages.iter().map(|page| &page.raw)
    }

    /// Decoded envelope of each page.
    pub fn envelopes(&self) -> impl Iterator<Item = &Value> {
        self.pages.iter().map(|page| &page.envelope)
    }

    /// Number of pages fetched.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no page was fetched.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl HelpdeskClient {
    /// Stream every page of a call.
    ///
    /// The first page uses `method` and `path`; later pages are plain GETs of
    /// the server-supplied `next_page` URL. The same options (side-loads,
    /// profile) apply to every page. The stream ends after the first error.
    pub fn pages(
        &self,
        method: RequestMethod,
        path: impl Into<PathSpec>,
        options: CallOptions,
    ) -> BoxStream<'static, Result<ApiResponse>> {
        let client = self.clone();
        let start = Cursor::Start(method, path.into());

        stream::try_unfold(start, move |cursor| {
            let client = client.clone();
            let options = options.clone();
            async move {
                let response = match cursor {
                    Cursor::Start(method, path) => {
                        client.execute(method, path, None, &options).await?
                    }
                    Cursor::Next(url) => {
                        debug!(url = %url, "Following next_page");
                        client
                            .execute(RequestMethod::Get, PathSpec::url(url), None, &options)
                            .await?
                    }
                    Cursor::Done => return Ok(None),
                };

                let next = match response.next_page() {
                    Some(url) => Cursor::Next(url.to_string()),
                    None => Cursor::Done,
                };
                Ok(Some((response, next)))
            }
        })
        .boxed()
    }

    /// Fetch every page and aggregate them.
    ///
    /// Either every page succeeds or the first error is returned; partial
    /// results are discarded.
    pub async fn request_all(
        &self,
        method: RequestMethod,
        path: impl Into<PathSpec>,
        options: &CallOptions,
    ) -> Result<PageSet> {
        let pages: Vec<ApiResponse> = self
            .pages(method, path, options.clone())
            .try_collect()
            .await?;
        debug!(pages = pages.len(), "Pagination complete");
        Ok(PageSet::from_pages(pages))
    }

    /// GET every page of a listing.
    pub async fn get_all(
        &self,
        path: impl Into<PathSpec>,
        options: &CallOptions,
    ) -> Result<PageSet> {
        self.request_all(RequestMethod::Get, path, options).await
    }
}
