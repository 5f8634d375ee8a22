//! Dashboard state and operations
//!
//! The dashboard owns everything the "My Drive" page shows: the files queued
//! for upload, the five most recent uploads, the status line, and the
//! loading/uploading flags. Network access goes through the capabilities it
//! is constructed with, so every operation can run against a scripted
//! transport.
//!
//! Operations:
//! - `load_recent_files` - refresh the recent-files list
//! - `select_files` / `remove_file` - edit the pending set (at most 5 files)
//! - `upload` - submit the pending set as one batch
//! - `delete_file` / `toggle_public` / `all_files` / `download_file` - per-file management

mod flag;
mod manage;
mod recent;
mod selection;
mod upload;

use std::sync::Arc;

use cloudshare_common::MAX_FILES_PER_UPLOAD;
use cloudshare_common::validators::FileCountError;

pub use flag::BusyFlag;

use crate::auth::TokenSource;
use crate::credits::CreditsRefresher;
use crate::transport::{FileTransport, RequestError};
use crate::types::{FileMetadata, PendingFile, StatusMessage, UploadResponse};

/// Result of one upload submission
#[derive(Debug)]
pub enum UploadOutcome {
    /// Validation failed; no request was sent
    Rejected(FileCountError),
    /// The batch was stored by the server
    Uploaded(UploadResponse),
    /// Token retrieval or the request failed; pending files are kept
    Failed(RequestError),
}

impl UploadOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, UploadOutcome::Uploaded(_))
    }
}

/// State behind the dashboard page
pub struct Dashboard {
    transport: Arc<dyn FileTransport>,
    tokens: Arc<dyn TokenSource>,
    credits: Arc<dyn CreditsRefresher>,

    /// Most recent uploads, newest first (at most five)
    recent_files: Vec<FileMetadata>,
    /// Files selected but not yet submitted
    pending: Vec<PendingFile>,
    /// Status line shown above the page
    message: Option<StatusMessage>,
    /// Set while the recent-files list is being fetched
    loading: BusyFlag,
    /// Set while an upload request is outstanding
    uploading: BusyFlag,
}

impl Dashboard {
    pub fn new(
        transport: Arc<dyn FileTransport>,
        tokens: Arc<dyn TokenSource>,
        credits: Arc<dyn CreditsRefresher>,
    ) -> Self {
        Self {
            transport,
            tokens,
            credits,
            recent_files: Vec::new(),
            pending: Vec::new(),
            message: None,
            loading: BusyFlag::new(),
            uploading: BusyFlag::new(),
        }
    }

    pub fn recent_files(&self) -> &[FileMetadata] {
        &self.recent_files
    }

    pub fn pending_files(&self) -> &[PendingFile] {
        &self.pending
    }

    pub fn message(&self) -> Option<&StatusMessage> {
        self.message.as_ref()
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_set()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading.is_set()
    }

    /// Handle for observing the uploading flag from another task
    pub fn uploading_flag(&self) -> BusyFlag {
        self.uploading.clone()
    }

    /// Handle for observing the loading flag from another task
    pub fn loading_flag(&self) -> BusyFlag {
        self.loading.clone()
    }

    /// How many more files fit in the current batch
    pub fn remaining_uploads(&self) -> usize {
        MAX_FILES_PER_UPLOAD.saturating_sub(self.pending.len())
    }

    fn set_message(&mut self, message: StatusMessage) {
        self.message = Some(message);
    }
}
