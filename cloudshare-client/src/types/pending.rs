//! Files selected for upload but not yet submitted
//!
//! Only the path, display name, and size are captured at selection time.
//! File contents are read when the batch is sent.

use std::io;
use std::path::{Path, PathBuf};

/// Error selecting a local file
#[derive(Debug)]
pub enum PendingFileError {
    /// The path could not be inspected
    Io { path: PathBuf, source: io::Error },
    /// The path exists but is not a regular file
    NotAFile(PathBuf),
}

impl std::fmt::Display for PendingFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PendingFileError::Io { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            PendingFileError::NotAFile(path) => write!(f, "{} is not a file", path.display()),
        }
    }
}

impl std::error::Error for PendingFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PendingFileError::Io { source, .. } => Some(source),
            PendingFileError::NotAFile(_) => None,
        }
    }
}

/// A local file queued for the next upload batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    /// Location on disk
    pub path: PathBuf,
    /// Name sent to the server (final path component)
    pub name: String,
    /// Size in bytes at selection time
    pub size: u64,
}

impl PendingFile {
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            size,
        }
    }

    /// Stat a local path and build a pending entry from it
    pub async fn from_path(path: &Path) -> Result<Self, PendingFileError> {
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| PendingFileError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        if !metadata.is_file() {
            return Err(PendingFileError::NotAFile(path.to_path_buf()));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Ok(Self::new(path, name, metadata.len()))
    }
}
