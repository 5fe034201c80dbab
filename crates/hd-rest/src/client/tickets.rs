use serde::Serialize;
use serde_json::json;
use tracing::instrument;

use busbar_hd_client::PathSpec;

use crate::error::{Error, ErrorKind, Result};
use crate::resources;
use crate::tickets::{NewTicket, Ticket};

use super::{call_options, record_path};

impl super::HelpdeskRestClient {
    /// List every ticket, following pagination.
    ///
    /// `include` names side-loads (`users`, `organizations`, `groups`) to
    /// join into each ticket; empty keeps the client default.
    #[instrument(skip(self))]
    pub async fn list_tickets(&self, include: &[&str]) -> Result<Vec<Ticket>> {
        let options = call_options(resources::tickets(), include);
        self.fetch_all(PathSpec::segments(["tickets"]), &options).await
    }

    /// Get a ticket by id.
    #[instrument(skip(self))]
    pub async fn show_ticket(&self, id: u64, include: &[&str]) -> Result<Ticket> {
        let options = call_options(resources::tickets(), include);
        self.fetch_one(record_path("tickets", id), &options).await
    }

    /// Create a ticket.
    #[instrument(skip(self, ticket))]
    pub async fn create_ticket(&self, ticket: &NewTicket) -> Result<Ticket> {
        let options = call_options(resources::tickets(), &[]);
        let response = self
            .client
            .post(
                PathSpec::segments(["tickets"]),
                &json!({ "ticket": ticket }),
                &options,
            )
            .await?;
        response.json().map_err(Into::into)
    }

    /// Update a ticket with any serializable set of changes.
    ///
    /// ```rust,ignore
    /// client.update_ticket(42, &json!({"status": "solved"})).await?;
    /// ```
    #[instrument(skip(self, changes))]
    pub async fn update_ticket<T: Serialize>(&self, id: u64, changes: &T) -> Result<Ticket> {
        let options = call_options(resources::tickets(), &[]);
        let response = self
            .client
            .put(
                record_path("tickets", id),
                &json!({ "ticket": changes }),
                &options,
            )
            .await?;
        response.json().map_err(Into::into)
    }

    /// Delete a ticket.
    ///
    /// The server answers with an empty body, which counts as success here.
    #[instrument(skip(self))]
    pub async fn delete_ticket(&self, id: u64) -> Result<()> {
        let options = call_options(resources::tickets(), &[]);
        match self.client.delete(record_path("tickets", id), &options).await {
            Ok(response) if response.raw.is_success() => Ok(()),
            Ok(response) => Err(Error::new(ErrorKind::UnexpectedResponse(format!(
                "delete returned status {}",
                response.status
            )))),
            Err(err) if err.is_empty_result() => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
