//! Recent-files loader

use cloudshare_common::RECENT_FILES_LIMIT;
use cloudshare_common::time::sort_most_recent;

use super::Dashboard;
use crate::transport::RequestError;
use crate::types::FileMetadata;

impl Dashboard {
    /// Replace the recent-files list with the newest uploads
    ///
    /// On failure the error is logged and the previous list stays in place.
    /// The loading flag is cleared either way.
    pub async fn load_recent_files(&mut self) {
        let _loading = self.loading.engage();

        match self.fetch_recent().await {
            Ok(files) => self.recent_files = files,
            Err(e) => tracing::error!("Error fetching recent files: {e}"),
        }
    }

    /// Fetch the listing with a fresh token and keep the newest few
    async fn fetch_recent(&self) -> Result<Vec<FileMetadata>, RequestError> {
        let token = self.tokens.token().await?;
        self.fetch_recent_with(&token).await
    }

    /// Fetch the listing with an already obtained token
    pub(super) async fn fetch_recent_with(
        &self,
        token: &str,
    ) -> Result<Vec<FileMetadata>, RequestError> {
        let files = self.transport.list_files(token).await?;
        tracing::debug!(count = files.len(), "fetched file listing");
        Ok(sort_most_recent(files, RECENT_FILES_LIMIT))
    }
}
