//! JSON bodies exchanged with the CloudShare REST API
//!
//! Field names follow the backend's camelCase convention. Everything except
//! `uploadedAt` is optional so a record is still usable when the backend
//! omits a field; unknown fields are ignored.

use serde::{Deserialize, Serialize};

/// Metadata for a file stored on the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileMetadata {
    /// Server-assigned identifier
    #[serde(default)]
    pub id: String,

    /// Original file name as uploaded
    #[serde(default)]
    pub name: String,

    /// Size in bytes
    #[serde(default)]
    pub size: u64,

    /// MIME type reported at upload time
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Owner's identity-provider user id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clerk_id: Option<String>,

    /// Whether the file can be fetched without authentication
    #[serde(default)]
    pub is_public: bool,

    /// Upload time as sent by the server (ISO 8601, with or without offset)
    pub uploaded_at: String,

    /// Server-side storage location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_location: Option<String>,
}

/// Successful upload response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Metadata for every file stored by the request
    #[serde(default)]
    pub files: Vec<FileMetadata>,

    /// Credits left after the upload was charged
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining_credits: Option<i64>,
}

/// Upload credit balance for the authenticated user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredits {
    /// Remaining uploads the user may perform
    #[serde(default)]
    pub credits: i64,

    /// Subscription plan (BASIC, PREMIUM, ULTIMATE)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
}

/// Body of a non-success response
///
/// The backend optionally includes a human-readable `message`, which clients
/// show verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Extract a non-empty message from a raw response body
    ///
    /// Returns `None` when the body is not JSON, has no `message`, or the
    /// message is blank.
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .filter(|m| !m.trim().is_empty())
    }
}
