//! Upload batch size validation
//!
//! A batch holds between 1 and [`MAX_FILES_PER_UPLOAD`] files. Selections that
//! would push the pending set past the limit are rejected whole; nothing is
//! truncated.

use std::fmt;

use crate::MAX_FILES_PER_UPLOAD;

/// Validation error for upload batch sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCountError {
    /// No files to upload
    Empty,
    /// More files than a single batch allows
    TooMany,
}

impl fmt::Display for FileCountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Please select at least one file to upload."),
            Self::TooMany => write!(
                f,
                "You can only upload a maximum of {MAX_FILES_PER_UPLOAD} files at once."
            ),
        }
    }
}

impl std::error::Error for FileCountError {}

/// Validate adding `incoming` files to `pending` already-selected files
///
/// An empty selection is accepted (it changes nothing).
///
/// # Errors
///
/// Returns `FileCountError::TooMany` if the combined count exceeds the limit.
pub fn validate_selection(pending: usize, incoming: usize) -> Result<(), FileCountError> {
    if pending.saturating_add(incoming) > MAX_FILES_PER_UPLOAD {
        return Err(FileCountError::TooMany);
    }
    Ok(())
}

/// Validate the size of a batch about to be submitted
///
/// # Errors
///
/// Returns `FileCountError::Empty` for zero files and `FileCountError::TooMany`
/// above the limit.
pub fn validate_batch(count: usize) -> Result<(), FileCountError> {
    if count == 0 {
        return Err(FileCountError::Empty);
    }
    if count > MAX_FILES_PER_UPLOAD {
        return Err(FileCountError::TooMany);
    }
    Ok(())
}
