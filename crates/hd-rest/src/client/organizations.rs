use tracing::instrument;

use busbar_hd_client::PathSpec;

use crate::error::Result;
use crate::organizations::Organization;
use crate::resources;

use super::{call_options, record_path};

impl super::HelpdeskRestClient {
    /// List every organization, following pagination.
    #[instrument(skip(self))]
    pub async fn list_organizations(&self) -> Result<Vec<Organization>> {
        let options = call_options(resources::organizations(), &[]);
        self.fetch_all(PathSpec::segments(["organizations"]), &options)
            .await
    }

    /// Get an organization by id.
    #[instrument(skip(self))]
    pub async fn show_organization(&self, id: u64) -> Result<Organization> {
        let options = call_options(resources::organizations(), &[]);
        self.fetch_one(record_path("organizations", id), &options)
            .await
    }
}
