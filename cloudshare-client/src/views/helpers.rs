//! Formatting helpers shared by the text views

use chrono::Local;

use cloudshare_common::time::parse_uploaded_at;

/// Format an `uploadedAt` value for display in local time
///
/// Values that cannot be parsed are shown as sent.
pub fn format_uploaded_at(value: &str) -> String {
    match parse_uploaded_at(value) {
        // Format as "Jan 15, 2025 10:30"
        Some(utc) => utc.with_timezone(&Local).format("%b %d, %Y %H:%M").to_string(),
        None => value.to_string(),
    }
}

/// Format a file size for display (human-readable)
pub fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if size >= TB {
        format!("{:.1} TB", size as f64 / TB as f64)
    } else if size >= GB {
        format!("{:.1} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.1} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1} KB", size as f64 / KB as f64)
    } else {
        format!("{size} B")
    }
}

/// Truncate a name to a maximum length, adding ellipsis if needed
pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else {
        // Leave room for "…" (1 character)
        let truncated: String = name.chars().take(max_len.saturating_sub(1)).collect();
        format!("{truncated}…")
    }
}
