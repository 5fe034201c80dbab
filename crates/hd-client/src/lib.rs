//! # busbar-hd-client
//!
//! Core HTTP client for the Helpdesk REST API.
//!
//! This crate provides:
//! - URL assembly from path segments, query data and side-load names
//! - Authenticated request execution (basic password, API token or OAuth)
//! - Response classification into success, empty result, rate limit or
//!   failure code
//! - Side-load resolution: joining related records into the primary payload
//! - Pagination by following `next_page` cursors
//! - Optional throttling and retry with exponential backoff
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │  (busbar-hd-rest: tickets, users, organizations, search)   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HelpdeskClient                           │
//! │  - URL assembly, auth headers, classification               │
//! │  - Envelope selection and side-loads                        │
//! │  - Pagination, throttle, retry                              │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Transport                                │
//! │  - ReqwestTransport by default                              │
//! │  - Any implementation for tests or custom stacks            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_hd_client::{CallOptions, ClientConfig, HelpdeskClient, PathSpec};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_hd_client::Error> {
//!     let client = HelpdeskClient::new(ClientConfig::from_env()?)?;
//!
//!     let all = client
//!         .get_all(PathSpec::segments(["tickets"]), &CallOptions::default())
//!         .await?;
//!     println!("{} pages", all.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod hooks;
mod pagination;
mod path;
mod profile;
mod request;
mod response;
mod retry;
mod sideload;
mod throttle;
mod transport;

pub use auth::{AuthScheme, Credentials};
pub use client::{ApiResponse, HelpdeskClient};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result, ERROR_LABEL};
pub use hooks::Observer;
pub use pagination::PageSet;
pub use path::{PathSpec, Query};
pub use profile::{CallOptions, ResourceProfile};
pub use request::{RequestBody, RequestDescriptor, RequestMethod};
pub use response::{
    classify, parse_retry_after, sanitize_error_message, select_primary, FailureCode, Outcome,
    RawResponse, StatusPolicy,
};
pub use retry::{BackoffStrategy, RetryConfig, RetryPolicy};
pub use sideload::{resolve as resolve_sideloads, SideLoadMapping};
pub use throttle::Throttle;
pub use transport::{ReqwestTransport, Transport};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("busbar-hd-api/", env!("CARGO_PKG_VERSION"));

/// User-Agent sent by default: client name and version plus the Rust toolchain
/// the crate declares.
pub fn user_agent() -> String {
    format!("{} rust/{}", USER_AGENT, env!("CARGO_PKG_RUST_VERSION"))
}
