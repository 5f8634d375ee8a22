//! Configuration persistence
//!
//! Settings are stored as JSON in `config.json` under the platform config
//! directory (e.g., `~/.config/cloudshare/config.json` on Linux).

pub mod settings;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub use settings::Settings;

use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME};

/// File permissions for the config file on Unix (owner read/write only)
#[cfg(unix)]
const CONFIG_FILE_MODE: u32 = 0o600;

/// Errors reading or writing the config file
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading/writing the file
    Io(io::Error),
    /// File contents are not valid config JSON
    Parse(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {}", e),
            ConfigError::Parse(e) => write!(f, "invalid config file: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

/// Persistent config file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    /// Connection and authentication settings
    #[serde(default)]
    pub settings: Settings,
}

impl Config {
    /// Get the platform-specific config file path
    ///
    /// Returns None if the config directory cannot be determined.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the config from `path`, or the default config if it doesn't exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&contents).map_err(ConfigError::Parse)
    }

    /// Save the config to `path` with restrictive permissions
    ///
    /// Creates the parent directory if it doesn't exist. On Unix the file
    /// mode is set to 0o600 since it may hold a bearer token.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Parse)?;
        fs::write(path, json).map_err(ConfigError::Io)?;

        #[cfg(unix)]
        Self::set_config_permissions(path)?;

        Ok(())
    }

    #[cfg(unix)]
    fn set_config_permissions(path: &Path) -> Result<(), ConfigError> {
        use std::os::unix::fs::PermissionsExt;

        let mut perms = fs::metadata(path).map_err(ConfigError::Io)?.permissions();
        perms.set_mode(CONFIG_FILE_MODE);
        fs::set_permissions(path, perms).map_err(ConfigError::Io)
    }
}

// =============================================================================
// Tests
// =============================================================================
