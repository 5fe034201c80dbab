use std::path::Path;

use tracing::instrument;

use busbar_hd_client::PathSpec;

use crate::error::{Error, ErrorKind, Result};
use crate::resources;
use crate::uploads::Upload;

use super::call_options;

impl super::HelpdeskRestClient {
    /// Upload a file for later attachment to a ticket comment.
    ///
    /// The file is streamed as `application/binary`. `filename` defaults to
    /// the file's own name; pass the `token` of an earlier upload to add
    /// this file to the same batch.
    #[instrument(skip(self, file), fields(file = %file.as_ref().display()))]
    pub async fn upload_attachment(
        &self,
        file: impl AsRef<Path>,
        filename: Option<&str>,
        token: Option<&str>,
    ) -> Result<Upload> {
        let file = file.as_ref();
        let filename = match filename {
            Some(name) if !name.is_empty() => name.to_string(),
            Some(_) => {
                return Err(Error::new(ErrorKind::InvalidInput(
                    "upload file name is empty".to_string(),
                )))
            }
            None => file
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .ok_or_else(|| {
                    Error::new(ErrorKind::InvalidInput(format!(
                        "cannot derive a file name from {}",
                        file.display()
                    )))
                })?,
        };

        let mut query = vec![("filename", filename)];
        if let Some(token) = token {
            query.push(("token", token.to_string()));
        }

        let options = call_options(resources::uploads(), &[]).without_include();
        let response = self
            .client
            .upload(PathSpec::segments(["uploads"]).with_query(query), file, &options)
            .await?;
        response.json().map_err(Into::into)
    }
}
