//! Application-wide constants
//!
//! Shared constants used across multiple modules.

/// Application directory name (used in config directory path)
pub const APP_DIR_NAME: &str = "cloudshare";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable holding a bearer token
pub const TOKEN_ENV_VAR: &str = "CLOUDSHARE_TOKEN";

/// Environment variable overriding the API base URL
pub const API_URL_ENV_VAR: &str = "CLOUDSHARE_API_URL";

// =============================================================================
// Status Messages
// =============================================================================

/// Shown while an upload request is outstanding
pub const MSG_UPLOADING: &str = "Uploading files...";

/// Shown after a batch upload succeeds
pub const MSG_UPLOAD_SUCCESS: &str = "Files uploaded successfully!";

/// Shown when an upload fails without a server-supplied message
pub const MSG_UPLOAD_FAILED: &str = "Error uploading files. Please try again.";

/// Shown when the file listing cannot be fetched
pub const MSG_FETCH_FAILED: &str = "Error fetching files.";

/// Shown after a file is deleted
pub const MSG_FILE_DELETED: &str = "File deleted successfully.";

/// Shown when a file cannot be deleted
pub const MSG_DELETE_FAILED: &str = "Error deleting the file.";

/// Shown when a file's visibility cannot be changed
pub const MSG_TOGGLE_FAILED: &str = "Error updating file visibility.";

/// Shown when a file cannot be downloaded
pub const MSG_DOWNLOAD_FAILED: &str = "Error downloading the file.";

/// Chunk size for streaming upload bodies
pub const UPLOAD_CHUNK_SIZE: usize = 64 * 1024;
