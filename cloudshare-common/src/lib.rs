//! CloudShare Common Library
//!
//! Shared types, limits, and utilities for talking to the CloudShare file API.

pub mod protocol;
pub mod time;
pub mod validators;

use std::time::Duration;

/// Maximum number of files accepted in a single upload batch
pub const MAX_FILES_PER_UPLOAD: usize = 5;

/// Number of files shown in the recent-files list
pub const RECENT_FILES_LIMIT: usize = 5;

/// Timeout applied to upload requests (5 minutes for large files)
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Timeout applied to download requests, including reading the body
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(300);

/// Multipart field name shared by every file in an upload batch
pub const UPLOAD_FIELD_NAME: &str = "files";

/// Default API base URL
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/v1.0";

/// Listing of every file owned by the authenticated user
pub const FETCH_FILES_PATH: &str = "/files/my";

/// Multipart upload endpoint
pub const UPLOAD_FILES_PATH: &str = "/files/upload";

/// Current credit balance for the authenticated user
pub const USER_CREDITS_PATH: &str = "/users/credits";

/// Path of a single file (used for DELETE)
pub fn file_path(id: &str) -> String {
    format!("/files/{id}")
}

/// Path that flips a file between public and private
pub fn toggle_public_path(id: &str) -> String {
    format!("/files/{id}/toggle-public")
}

/// Path of a publicly shared file's metadata
pub fn public_file_path(id: &str) -> String {
    format!("/files/public/{id}")
}

/// Path that streams a file's contents as an attachment
///
/// Owners may download any of their files; anyone may download a public one.
pub fn download_path(id: &str) -> String {
    format!("/files/download/{id}")
}
