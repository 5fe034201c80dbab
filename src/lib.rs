//! # busbar-hd-api
//!
//! A Helpdesk REST API client library for Rust.
//!
//! This library provides authenticated access to a helpdesk's tickets,
//! users and organizations with side-loading, pagination, throttling and
//! optional retry built in.
//!
//! ## Security
//!
//! - Credentials are redacted in Debug output
//! - Authorization headers never appear in request Debug output
//! - Response bodies are sanitized before they are logged
//!
//! ## Crates
//!
//! - **busbar-hd-client** - Core HTTP client: URL assembly, execution, classification, side-loads, pagination
//! - **busbar-hd-rest** - Typed resources: tickets, users, organizations, groups, search, uploads
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use busbar_hd_api::{ClientConfig, Credentials, HelpdeskRestClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::builder(
//!         "https://acme.helpdesk.test/api/v2",
//!         Credentials::with_token("agent@acme.test", "api-token"),
//!     )
//!     .with_include(["users"])
//!     .build()?;
//!
//!     let client = HelpdeskRestClient::new(config)?;
//!
//!     for ticket in client.list_tickets(&[]).await? {
//!         println!("#{} {:?}", ticket.id, ticket.subject);
//!     }
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "client")]
pub use busbar_hd_client as client;
#[cfg(feature = "rest")]
pub use busbar_hd_rest as rest;

// Re-export commonly used types at the top level
#[cfg(feature = "client")]
pub use busbar_hd_client::{
    CallOptions, ClientConfig, Credentials, HelpdeskClient, PathSpec, RequestMethod,
};
#[cfg(feature = "rest")]
pub use busbar_hd_rest::HelpdeskRestClient;
