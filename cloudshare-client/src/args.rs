//! Command-line argument parsing

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cloudshare_client::constants::{API_URL_ENV_VAR, TOKEN_ENV_VAR};

/// Get default config path help text for current platform
fn default_config_help() -> String {
    #[cfg(target_os = "linux")]
    return "Config file path (default: ~/.config/cloudshare/config.json)".to_string();

    #[cfg(target_os = "macos")]
    return "Config file path (default: ~/Library/Application Support/cloudshare/config.json)"
        .to_string();

    #[cfg(target_os = "windows")]
    return "Config file path (default: %APPDATA%\\cloudshare\\config.json)".to_string();

    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    return "Config file path (overrides platform default)".to_string();
}

/// CloudShare command-line client
#[derive(Parser, Debug)]
#[command(name = "cloudshare", author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the CloudShare API
    #[arg(long, global = true, env = API_URL_ENV_VAR)]
    pub api_url: Option<String>,

    /// Bearer token for the API
    #[arg(long, global = true, env = TOKEN_ENV_VAR, hide_env_values = true)]
    pub token: Option<String>,

    /// Shell command that prints a bearer token (run before every request)
    #[arg(long, global = true)]
    pub token_command: Option<String>,

    /// Config file path (overrides platform default)
    #[arg(short, long, global = true, help = default_config_help())]
    pub config: Option<PathBuf>,

    /// Enable debug logging (shows request and upload progress details)
    #[arg(long, global = true, default_value = "false")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the five most recently uploaded files
    Recent {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List every uploaded file, newest first
    Files {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Upload up to five files in one batch
    Upload {
        /// Files to upload
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Delete an uploaded file
    Delete {
        /// File identifier (see `files`)
        id: String,
    },

    /// Make a file public, or private again
    TogglePublic {
        /// File identifier (see `files`)
        id: String,
    },

    /// Show a publicly shared file (no token required)
    Public {
        /// File identifier
        id: String,
    },

    /// Download a file's contents
    Download {
        /// File identifier (see `files`)
        id: String,

        /// Where to write the file (default: the file's name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the remaining upload credits
    Credits,

    /// Show the effective settings (tokens redacted)
    Config {
        /// Write the effective settings back to the config file
        #[arg(long)]
        save: bool,
    },
}
