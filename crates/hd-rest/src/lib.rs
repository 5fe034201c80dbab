//! # hd-rest
//!
//! Helpdesk REST API client for tickets, users, organizations and search.
//!
//! ## Features
//!
//! - **Tickets** - List, show, create, update and delete tickets
//! - **Side-loads** - Requesters, assignees, organizations and groups joined
//!   into each record
//! - **Users** - List and show users, look up the authenticated user
//! - **Organizations and groups** - List and show
//! - **Search** - Unified search across resources
//! - **Uploads** - Stream files up for comment attachments
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_hd_rest::{ClientConfig, Comment, HelpdeskRestClient, NewTicket};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), busbar_hd_rest::Error> {
//!     let client = HelpdeskRestClient::new(ClientConfig::from_env()?)?;
//!
//!     let me = client.current_user().await?;
//!     println!("signed in as {:?}", me.email);
//!
//!     let upload = client
//!         .upload_attachment("crash.log", None, None)
//!         .await?;
//!     let ticket = client
//!         .create_ticket(&NewTicket::new(
//!             "Crash on startup",
//!             Comment::new("Log attached").with_upload(upload.token),
//!         ))
//!         .await?;
//!
//!     for hit in client.search("type:ticket status:open").await? {
//!         println!("{} {:?}", hit.result_type, hit.id);
//!     }
//!
//!     client.delete_ticket(ticket.id).await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
pub mod groups;
pub mod organizations;
pub mod resources;
pub mod search;
pub mod tickets;
pub mod uploads;
pub mod users;

// Main client
pub use client::HelpdeskRestClient;

// Error types
pub use error::{Error, ErrorKind, Result};

// Record types
pub use groups::Group;
pub use organizations::Organization;
pub use search::SearchHit;
pub use tickets::{Comment, NewTicket, Ticket};
pub use uploads::{Attachment, Upload};
pub use users::User;

// Re-export hd-client types that users might need
pub use busbar_hd_client::{CallOptions, ClientConfig, ClientConfigBuilder, Credentials};
