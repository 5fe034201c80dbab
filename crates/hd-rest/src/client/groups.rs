use tracing::instrument;

use busbar_hd_client::PathSpec;

use crate::error::Result;
use crate::groups::Group;
use crate::resources;

use super::call_options;

impl super::HelpdeskRestClient {
    /// List every agent group.
    #[instrument(skip(self))]
    pub async fn list_groups(&self) -> Result<Vec<Group>> {
        let options = call_options(resources::groups(), &[]);
        self.fetch_all(PathSpec::segments(["groups"]), &options).await
    }
}
