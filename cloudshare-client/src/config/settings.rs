//! User preference settings

use cloudshare_common::DEFAULT_API_URL;

// =============================================================================
// Constants
// =============================================================================

/// Default timeout for listing and metadata requests, in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Settings
// =============================================================================

/// Connection and authentication settings
#[derive(Clone, serde::Serialize, serde::Deserialize)]
pub struct Settings {
    /// Base URL of the CloudShare API (e.g., "https://example.com/api/v1.0")
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Static bearer token
    ///
    /// Ignored when `token_command` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Shell command that prints a fresh bearer token on stdout
    ///
    /// Run before every request so short-lived tokens never go stale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_command: Option<String>,

    /// Timeout for non-upload requests, in seconds
    ///
    /// Uploads always use the fixed five-minute upload timeout.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            token: None,
            token_command: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

// Manual Debug implementation to keep tokens out of logs
impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_url", &self.api_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_command", &self.token_command)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

// =============================================================================
// Default Functions (for serde)
// =============================================================================

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

// =============================================================================
// Tests
// =============================================================================
