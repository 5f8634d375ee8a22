//! File listings: the pending selection and uploaded-file tables

use std::fmt::Write;

use cloudshare_common::MAX_FILES_PER_UPLOAD;

use super::helpers::{format_size, format_uploaded_at, truncate_name};
use crate::types::{FileMetadata, PendingFile};

/// Maximum width of the name column
const NAME_COLUMN_WIDTH: usize = 40;

/// Render the files queued for upload
///
/// Entries are numbered from 1 so the index can be passed back to
/// `remove_file` after subtracting one.
pub fn render_pending(pending: &[PendingFile]) -> String {
    let mut out = String::new();
    let remaining = MAX_FILES_PER_UPLOAD.saturating_sub(pending.len());

    if pending.is_empty() {
        let _ = writeln!(out, "No files selected (up to {MAX_FILES_PER_UPLOAD} per upload).");
        return out;
    }

    let _ = writeln!(
        out,
        "Selected files ({}/{MAX_FILES_PER_UPLOAD}, {remaining} remaining):",
        pending.len()
    );
    for (i, file) in pending.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {}  ({})",
            i + 1,
            truncate_name(&file.name, NAME_COLUMN_WIDTH),
            format_size(file.size)
        );
    }
    out
}

/// Render uploaded files as a table
pub fn render_file_table(title: &str, files: &[FileMetadata]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");

    if files.is_empty() {
        let _ = writeln!(out, "  No files uploaded yet.");
        return out;
    }

    let _ = writeln!(
        out,
        "  {:<width$}  {:>10}  {:<18}  {:<8}  ID",
        "NAME",
        "SIZE",
        "UPLOADED",
        "SHARING",
        width = NAME_COLUMN_WIDTH
    );
    for file in files {
        let _ = writeln!(
            out,
            "  {:<width$}  {:>10}  {:<18}  {:<8}  {}",
            truncate_name(&file.name, NAME_COLUMN_WIDTH),
            format_size(file.size),
            format_uploaded_at(&file.uploaded_at),
            if file.is_public { "public" } else { "private" },
            file.id,
            width = NAME_COLUMN_WIDTH
        );
    }
    out
}

/// Render the details of one file
pub fn render_file_details(file: &FileMetadata) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Name:      {}", file.name);
    let _ = writeln!(out, "ID:        {}", file.id);
    let _ = writeln!(out, "Size:      {}", format_size(file.size));
    if let Some(content_type) = &file.content_type {
        let _ = writeln!(out, "Type:      {content_type}");
    }
    let _ = writeln!(out, "Uploaded:  {}", format_uploaded_at(&file.uploaded_at));
    let _ = writeln!(
        out,
        "Sharing:   {}",
        if file.is_public { "public" } else { "private" }
    );
    out
}
