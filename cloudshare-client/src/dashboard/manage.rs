//! Per-file management: listing, deletion, sharing, and downloads

use std::path::{Path, PathBuf};

use cloudshare_common::time::sort_most_recent;

use super::Dashboard;
use crate::constants::{MSG_DELETE_FAILED, MSG_DOWNLOAD_FAILED, MSG_FILE_DELETED, MSG_TOGGLE_FAILED};
use crate::transport::RequestError;
use crate::types::{FileMetadata, StatusMessage};

impl Dashboard {
    /// Every file owned by the user, newest first
    pub async fn all_files(&self) -> Result<Vec<FileMetadata>, RequestError> {
        let token = self.tokens.token().await?;
        let files = self.transport.list_files(&token).await?;
        Ok(sort_most_recent(files, usize::MAX))
    }

    /// Metadata of a publicly shared file
    pub async fn public_file(&self, id: &str) -> Result<FileMetadata, RequestError> {
        Ok(self.transport.public_file(id).await?)
    }

    /// Delete a file and refresh the recent-files list
    pub async fn delete_file(&mut self, id: &str) -> Result<(), RequestError> {
        let result = async {
            let token = self.tokens.token().await?;
            self.transport.delete_file(&token, id).await?;
            Ok::<_, RequestError>(token)
        }
        .await;

        match result {
            Ok(token) => {
                tracing::info!(id, "deleted file");
                self.set_message(StatusMessage::success(MSG_FILE_DELETED));
                self.recent_files.retain(|f| f.id != id);
                match self.fetch_recent_with(&token).await {
                    Ok(files) => self.recent_files = files,
                    Err(e) => tracing::error!("Error fetching recent files: {e}"),
                }
                Ok(())
            }
            Err(e) => {
                tracing::error!("Error deleting file {id}: {e}");
                let text = e.server_message().unwrap_or(MSG_DELETE_FAILED).to_string();
                self.set_message(StatusMessage::error(text));
                Err(e)
            }
        }
    }

    /// Flip a file between public and private
    ///
    /// The updated record replaces its entry in the recent-files list.
    pub async fn toggle_public(&mut self, id: &str) -> Result<FileMetadata, RequestError> {
        let result = async {
            let token = self.tokens.token().await?;
            Ok::<_, RequestError>(self.transport.toggle_public(&token, id).await?)
        }
        .await;

        match result {
            Ok(updated) => {
                let visibility = if updated.is_public { "public" } else { "private" };
                self.set_message(StatusMessage::success(format!(
                    "{} is now {}.",
                    updated.name, visibility
                )));
                if let Some(entry) = self.recent_files.iter_mut().find(|f| f.id == updated.id) {
                    *entry = updated.clone();
                }
                Ok(updated)
            }
            Err(e) => {
                tracing::error!("Error toggling visibility of {id}: {e}");
                let text = e.server_message().unwrap_or(MSG_TOGGLE_FAILED).to_string();
                self.set_message(StatusMessage::error(text));
                Err(e)
            }
        }
    }

    /// Save a file's contents to `dest`, returning the path written
    ///
    /// Without `dest` the file is saved under its own name in the current
    /// directory, or under its id when the name is not known.
    pub async fn download_file(
        &mut self,
        id: &str,
        dest: Option<&Path>,
    ) -> Result<PathBuf, RequestError> {
        let result = async {
            let token = self.tokens.token().await?;
            let dest = match dest {
                Some(dest) => dest.to_path_buf(),
                None => self.default_download_path(&token, id).await,
            };
            let written = self.transport.download_file(&token, id, &dest).await?;
            Ok::<_, RequestError>((dest, written))
        }
        .await;

        match result {
            Ok((dest, written)) => {
                tracing::info!(id, bytes = written, "downloaded file");
                self.set_message(StatusMessage::success(format!(
                    "Downloaded {}.",
                    dest.display()
                )));
                Ok(dest)
            }
            Err(e) => {
                tracing::error!("Error downloading file {id}: {e}");
                let text = e.server_message().unwrap_or(MSG_DOWNLOAD_FAILED).to_string();
                self.set_message(StatusMessage::error(text));
                Err(e)
            }
        }
    }

    async fn default_download_path(&self, token: &str, id: &str) -> PathBuf {
        let mut name = self
            .recent_files
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.name.clone());
        if name.is_none() {
            match self.transport.list_files(token).await {
                Ok(files) => name = files.into_iter().find(|f| f.id == id).map(|f| f.name),
                Err(e) => tracing::debug!("could not look up file name: {e}"),
            }
        }

        // Only the final component of a server-supplied name is used
        name.as_deref()
            .and_then(|name| Path::new(name).file_name())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(id))
    }
}
