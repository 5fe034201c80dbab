use tracing::instrument;

use busbar_hd_client::PathSpec;

use crate::error::Result;
use crate::resources;
use crate::users::User;

use super::{call_options, record_path};

impl super::HelpdeskRestClient {
    /// List every user, following pagination.
    #[instrument(skip(self))]
    pub async fn list_users(&self, include: &[&str]) -> Result<Vec<User>> {
        let options = call_options(resources::users(), include);
        self.fetch_all(PathSpec::segments(["users"]), &options).await
    }

    /// Get a user by id.
    #[instrument(skip(self))]
    pub async fn show_user(&self, id: u64, include: &[&str]) -> Result<User> {
        let options = call_options(resources::users(), include);
        self.fetch_one(record_path("users", id), &options).await
    }

    /// The user the client is authenticated as.
    #[instrument(skip(self))]
    pub async fn current_user(&self) -> Result<User> {
        let options = call_options(resources::users(), &[]);
        self.fetch_one(PathSpec::segments(["users", "me"]), &options)
            .await
    }
}
