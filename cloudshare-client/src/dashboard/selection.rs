//! Selection accumulator for the pending upload set

use cloudshare_common::validators::{FileCountError, validate_selection};

use super::Dashboard;
use crate::types::{PendingFile, StatusMessage};

impl Dashboard {
    /// Append newly selected files to the pending set
    ///
    /// If the combined count would exceed the batch limit the whole selection
    /// is rejected, the pending set is left untouched, and an error message
    /// is shown. A successful selection clears the status line.
    pub fn select_files(&mut self, files: Vec<PendingFile>) -> Result<(), FileCountError> {
        if let Err(e) = validate_selection(self.pending.len(), files.len()) {
            tracing::debug!(
                pending = self.pending.len(),
                selected = files.len(),
                "selection rejected"
            );
            self.set_message(StatusMessage::error(e.to_string()));
            return Err(e);
        }

        self.pending.extend(files);
        self.clear_message();
        Ok(())
    }

    /// Remove the pending file at `index`
    ///
    /// Out-of-range indices leave the set unchanged. The status line is
    /// cleared in both cases.
    pub fn remove_file(&mut self, index: usize) -> Option<PendingFile> {
        let removed = (index < self.pending.len()).then(|| self.pending.remove(index));
        self.clear_message();
        removed
    }
}
