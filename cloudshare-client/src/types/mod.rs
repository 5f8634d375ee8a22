//! Type definitions for the CloudShare client

mod pending;
mod status;

// Re-export types for convenience
pub use cloudshare_common::protocol::{FileMetadata, UploadResponse, UserCredits};
pub use pending::{PendingFile, PendingFileError};
pub use status::{MessageKind, StatusMessage};
