use tracing::instrument;

use busbar_hd_client::PathSpec;

use crate::error::{Error, ErrorKind, Result};
use crate::resources;
use crate::search::SearchHit;

use super::call_options;

impl super::HelpdeskRestClient {
    /// Run a unified search and collect every page of hits.
    ///
    /// The query uses the server's search syntax, e.g.
    /// `type:ticket status:open printer`.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        if query.trim().is_empty() {
            return Err(Error::new(ErrorKind::InvalidInput(
                "search query is empty".to_string(),
            )));
        }
        let options = call_options(resources::search(), &[]);
        let path = PathSpec::segments(["search"]).with_query([("query", query)]);
        self.fetch_all(path, &options).await
    }
}
