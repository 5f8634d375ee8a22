//! Upload submitter
//!
//! One submission is validated, sent as a single multipart request, and then
//! either clears the pending set (success) or leaves it for resubmission
//! (failure). The uploading flag is held by a guard for the whole submission.

use tokio::sync::mpsc;

use cloudshare_common::validators::validate_batch;

use super::{Dashboard, UploadOutcome};
use crate::constants::{MSG_UPLOAD_FAILED, MSG_UPLOAD_SUCCESS, MSG_UPLOADING};
use crate::transport::{RequestError, UploadProgress};
use crate::types::{StatusMessage, UploadResponse};

impl Dashboard {
    /// Submit every pending file as one batch
    ///
    /// After a successful upload the recent-files list is re-fetched and the
    /// credits refresher is invoked. A failure shows the server's message when
    /// it sent one, otherwise a generic message.
    pub async fn upload(&mut self) -> UploadOutcome {
        if let Err(e) = validate_batch(self.pending.len()) {
            self.set_message(StatusMessage::error(e.to_string()));
            return UploadOutcome::Rejected(e);
        }

        let _uploading = self.uploading.engage();
        self.set_message(StatusMessage::info(MSG_UPLOADING));

        match self.send_batch().await {
            Ok((token, response)) => {
                tracing::info!(
                    files = self.pending.len(),
                    remaining_credits = ?response.remaining_credits,
                    "upload complete"
                );
                self.set_message(StatusMessage::success(MSG_UPLOAD_SUCCESS));
                self.pending.clear();

                // The batch is already stored: a failed refetch is logged
                // only, and the success message and credits refresh stand
                match self.fetch_recent_with(&token).await {
                    Ok(files) => self.recent_files = files,
                    Err(e) => tracing::error!("Error fetching recent files: {e}"),
                }
                self.credits.refresh().await;

                UploadOutcome::Uploaded(response)
            }
            Err(e) => {
                tracing::error!("Error uploading files: {e}");
                let text = e.server_message().unwrap_or(MSG_UPLOAD_FAILED).to_string();
                self.set_message(StatusMessage::error(text));
                UploadOutcome::Failed(e)
            }
        }
    }

    /// Obtain a token and send the pending set; returns the token for reuse
    async fn send_batch(&self) -> Result<(String, UploadResponse), RequestError> {
        let token = self.tokens.token().await?;

        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(log_progress(rx));

        let response = self
            .transport
            .upload_files(&token, &self.pending, Some(tx))
            .await?;
        Ok((token, response))
    }
}

/// Log progress events until the sender side is dropped
async fn log_progress(mut rx: mpsc::UnboundedReceiver<UploadProgress>) {
    let mut last = None;
    while let Some(progress) = rx.recv().await {
        let percent = progress.percent();
        if last != Some(percent) {
            tracing::debug!("Upload Progress: {percent}%");
            last = Some(percent);
        }
    }
}
