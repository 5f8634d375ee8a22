//! Bearer token sources
//!
//! Every request asks its [`TokenSource`] for a token immediately before it
//! is sent, so sources backed by an identity provider can hand out
//! short-lived tokens without the caller caching anything.

use std::io;

use async_trait::async_trait;
use tokio::process::Command;

/// Errors obtaining a bearer token
#[derive(Debug)]
pub enum AuthError {
    /// No token or token command is configured
    NotConfigured,
    /// The source produced an empty token
    EmptyToken,
    /// The token command could not be started
    Io(io::Error),
    /// The token command exited unsuccessfully
    CommandFailed { status: Option<i32>, stderr: String },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::NotConfigured => write!(f, "no bearer token configured"),
            AuthError::EmptyToken => write!(f, "token source returned an empty token"),
            AuthError::Io(e) => write!(f, "failed to run token command: {}", e),
            AuthError::CommandFailed { status, stderr } => {
                match status {
                    Some(code) => write!(f, "token command exited with status {}", code)?,
                    None => write!(f, "token command terminated by signal")?,
                }
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for AuthError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AuthError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Supplies bearer tokens on demand
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Return a token valid for the next request
    async fn token(&self) -> Result<String, AuthError>;
}

/// A fixed token (from config, a flag, or the environment)
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl std::fmt::Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"[REDACTED]").finish()
    }
}

#[async_trait]
impl TokenSource for StaticToken {
    async fn token(&self) -> Result<String, AuthError> {
        let token = self.0.trim();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        Ok(token.to_string())
    }
}

/// Runs a shell command and uses its trimmed stdout as the token
#[derive(Debug, Clone)]
pub struct CommandToken {
    command: String,
}

impl CommandToken {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn shell_command(&self) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(&self.command);
            cmd
        }
        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(&self.command);
            cmd
        }
    }
}

#[async_trait]
impl TokenSource for CommandToken {
    async fn token(&self) -> Result<String, AuthError> {
        let output = self
            .shell_command()
            .kill_on_drop(true)
            .output()
            .await
            .map_err(AuthError::Io)?;

        if !output.status.success() {
            return Err(AuthError::CommandFailed {
                status: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let token = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if token.is_empty() {
            return Err(AuthError::EmptyToken);
        }
        tracing::trace!("obtained token from command");
        Ok(token)
    }
}

/// Token source used when nothing is configured; always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

#[async_trait]
impl TokenSource for NoToken {
    async fn token(&self) -> Result<String, AuthError> {
        Err(AuthError::NotConfigured)
    }
}
