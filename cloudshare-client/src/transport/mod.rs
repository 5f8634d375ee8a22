//! File API transport
//!
//! [`FileTransport`] is the narrow interface the dashboard talks to; every
//! call takes the bearer token explicitly. [`HttpTransport`] implements it
//! over HTTPS with reqwest.
//!
//! Key types:
//! - `FileTransport` - listing, upload, download, and per-file operations
//! - `UploadProgress` - byte counts reported while an upload body is sent
//! - `TransportError` - failure of a single request
//! - `RequestError` - token or transport failure, as seen by callers

mod http;

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::sync::mpsc;

use cloudshare_common::protocol::{FileMetadata, UploadResponse, UserCredits};

pub use http::HttpTransport;

use crate::auth::AuthError;
use crate::types::PendingFile;

// =============================================================================
// Progress Events
// =============================================================================

/// Upload progress sent from the transport while the body is streamed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadProgress {
    /// Bytes of file data sent so far
    pub loaded: u64,
    /// Total bytes of file data in the batch
    pub total: u64,
}

impl UploadProgress {
    /// Completed percentage, rounded to the nearest whole number
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = (self.loaded as f64 * 100.0 / self.total as f64).round();
        pct.clamp(0.0, 100.0) as u8
    }
}

// =============================================================================
// Errors
// =============================================================================

/// Failure of a single API request
#[derive(Debug)]
pub enum TransportError {
    /// Server answered with a non-success status
    ///
    /// `message` carries the server's `{ "message": ... }` text when present.
    Status { status: u16, message: Option<String> },
    /// Request did not complete in time
    Timeout,
    /// Connection or protocol failure
    Network(String),
    /// Response body was not the expected JSON
    Decode(String),
    /// Local file could not be read
    Io(io::Error),
}

impl TransportError {
    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransportError::Status {
                status,
                message: Some(message),
            } => write!(f, "server returned {}: {}", status, message),
            TransportError::Status {
                status,
                message: None,
            } => write!(f, "server returned {}", status),
            TransportError::Timeout => write!(f, "request timed out"),
            TransportError::Network(e) => write!(f, "network error: {}", e),
            TransportError::Decode(e) => write!(f, "invalid response: {}", e),
            TransportError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Any failure of an authenticated request: token retrieval or transport
#[derive(Debug)]
pub enum RequestError {
    Auth(AuthError),
    Transport(TransportError),
}

impl RequestError {
    /// Message supplied by the server, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            RequestError::Transport(e) => e.server_message(),
            RequestError::Auth(_) => None,
        }
    }
}

impl std::fmt::Display for RequestError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestError::Auth(e) => write!(f, "authentication failed: {}", e),
            RequestError::Transport(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Auth(e) => Some(e),
            RequestError::Transport(e) => Some(e),
        }
    }
}

impl From<AuthError> for RequestError {
    fn from(e: AuthError) -> Self {
        RequestError::Auth(e)
    }
}

impl From<TransportError> for RequestError {
    fn from(e: TransportError) -> Self {
        RequestError::Transport(e)
    }
}

// =============================================================================
// Transport
// =============================================================================

/// Requests the CloudShare file API supports
#[async_trait]
pub trait FileTransport: Send + Sync {
    /// Fetch every file owned by the token's user, in server order
    async fn list_files(&self, token: &str) -> Result<Vec<FileMetadata>, TransportError>;

    /// Upload a batch of files as one multipart request
    ///
    /// Progress is reported on `progress` while the body is sent; a closed
    /// receiver is ignored.
    async fn upload_files(
        &self,
        token: &str,
        files: &[PendingFile],
        progress: Option<mpsc::UnboundedSender<UploadProgress>>,
    ) -> Result<UploadResponse, TransportError>;

    /// Delete a file owned by the token's user
    async fn delete_file(&self, token: &str, id: &str) -> Result<(), TransportError>;

    /// Flip a file between public and private; returns the updated record
    async fn toggle_public(&self, token: &str, id: &str) -> Result<FileMetadata, TransportError>;

    /// Fetch metadata of a public file (no authentication)
    async fn public_file(&self, id: &str) -> Result<FileMetadata, TransportError>;

    /// Stream a file's contents to `dest`; returns the number of bytes written
    ///
    /// A partially written `dest` is removed when the transfer fails.
    async fn download_file(
        &self,
        token: &str,
        id: &str,
        dest: &Path,
    ) -> Result<u64, TransportError>;

    /// Fetch the token's user credit balance
    async fn user_credits(&self, token: &str) -> Result<UserCredits, TransportError>;
}
