//! Helpdesk REST resource client.
//!
//! This client wraps `HelpdeskClient` from `hd-client` and provides typed
//! methods for tickets, users, organizations, groups, search and uploads.

use std::sync::Arc;

use busbar_hd_client::{CallOptions, ClientConfig, HelpdeskClient, PathSpec, ResourceProfile};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

mod attachments;
mod groups;
mod organizations;
mod search;
mod tickets;
mod users;

/// Helpdesk REST API client.
///
/// Provides typed methods for:
/// - Ticket CRUD with side-loaded requesters, assignees and organizations
/// - Users, including the authenticated user
/// - Organizations and groups
/// - Unified search
/// - File uploads for comment attachments
///
/// Listings follow `next_page` until exhausted.
///
/// # Example
///
/// ```rust,ignore
/// use busbar_hd_rest::{Comment, HelpdeskRestClient, NewTicket};
///
/// let client = HelpdeskRestClient::new(ClientConfig::from_env()?)?;
///
/// let tickets = client.list_tickets(&["users"]).await?;
/// for ticket in &tickets {
///     let requester = ticket.requester.as_ref().and_then(|u| u.name.as_deref());
///     println!("#{} {:?} from {:?}", ticket.id, ticket.subject, requester);
/// }
///
/// let created = client
///     .create_ticket(&NewTicket::new("Printer on fire", Comment::new("Help!")))
///     .await?;
/// client.delete_ticket(created.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct HelpdeskRestClient {
    client: HelpdeskClient,
}

impl HelpdeskRestClient {
    /// Create a new REST client from a validated configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = HelpdeskClient::new(config)?;
        Ok(Self { client })
    }

    /// Create a REST client from an existing HelpdeskClient.
    pub fn from_client(client: HelpdeskClient) -> Self {
        Self { client }
    }

    /// Get the underlying HelpdeskClient.
    pub fn inner(&self) -> &HelpdeskClient {
        &self.client
    }

    /// Get the API base URL.
    pub fn remote_uri(&self) -> &str {
        &self.client.config().remote_uri
    }

    /// Fetch a single record.
    async fn fetch_one<T: DeserializeOwned>(
        &self,
        path: PathSpec,
        options: &CallOptions,
    ) -> Result<T> {
        let response = self.client.get(path, options).await?;
        response.json().map_err(Into::into)
    }

    /// Fetch every page of a listing and decode each record.
    async fn fetch_all<T: DeserializeOwned>(
        &self,
        path: PathSpec,
        options: &CallOptions,
    ) -> Result<Vec<T>> {
        let pages = self.client.get_all(path, options).await?;
        pages
            .body
            .into_iter()
            .map(|record| {
                serde_json::from_value(record)
                    .map_err(|e| Error::from(busbar_hd_client::Error::from(e)))
            })
            .collect()
    }
}

/// Call options for a resource; an empty `include` keeps the client default.
fn call_options(profile: Arc<ResourceProfile>, include: &[&str]) -> CallOptions {
    let options = CallOptions::with_profile(profile);
    if include.is_empty() {
        options
    } else {
        options.include(include.iter().copied())
    }
}

/// `[resource, id]` path.
fn record_path(resource: &str, id: u64) -> PathSpec {
    PathSpec::segments([resource.to_string(), id.to_string()])
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use busbar_hd_client::Credentials;

    pub(crate) fn test_client(uri: &str) -> HelpdeskRestClient {
        let config = ClientConfig::builder(uri, Credentials::with_token("agent@acme.test", "tok"))
            .build()
            .unwrap();
        HelpdeskRestClient::new(config).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = test_client("https://acme.helpdesk.test/api/v2");
        assert_eq!(client.remote_uri(), "https://acme.helpdesk.test/api/v2");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ClientConfig {
            remote_uri: "ftp://acme.helpdesk.test".to_string(),
            ..ClientConfig::builder("https://x.test", Credentials::with_token("a", "t"))
                .build()
                .unwrap()
        };
        let err = HelpdeskRestClient::new(config).unwrap_err();
        assert!(matches!(err.kind, crate::ErrorKind::Client(_)));
    }

    #[test]
    fn test_call_options_include() {
        let options = call_options(crate::resources::tickets(), &[]);
        assert!(options.include.is_none());

        let options = call_options(crate::resources::tickets(), &["users", "groups"]);
        assert_eq!(
            options.include,
            Some(vec!["users".to_string(), "groups".to_string()])
        );
    }

    #[test]
    fn test_record_path() {
        let url = record_path("tickets", 42)
            .assemble("https://acme.helpdesk.test/api/v2", &[])
            .unwrap();
        assert_eq!(url, "https://acme.helpdesk.test/api/v2/tickets/42.json");
    }
}
