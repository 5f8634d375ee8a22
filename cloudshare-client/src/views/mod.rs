//! Plain-text rendering of dashboard state

mod files;
mod helpers;

use std::fmt::Write;

pub use files::{render_file_details, render_file_table, render_pending};
pub use helpers::{format_size, format_uploaded_at, truncate_name};

use crate::dashboard::Dashboard;
use crate::types::{StatusMessage, UserCredits};

/// Title above the recent-files table
pub const RECENT_FILES_TITLE: &str = "Recent uploads";

/// Render the status line, prefixed by its kind
pub fn render_message(message: &StatusMessage) -> String {
    format!("[{}] {}", message.kind.as_str(), message.text)
}

/// Render a credit balance
pub fn render_credits(credits: &UserCredits) -> String {
    match &credits.plan {
        Some(plan) => format!("Credits: {} ({plan} plan)", credits.credits),
        None => format!("Credits: {}", credits.credits),
    }
}

/// Render the whole dashboard page
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut out = String::new();

    if let Some(message) = dashboard.message() {
        let _ = writeln!(out, "{}", render_message(message));
        out.push('\n');
    }

    if dashboard.is_loading() {
        let _ = writeln!(out, "Loading recent files...");
    } else {
        out.push_str(&render_file_table(
            RECENT_FILES_TITLE,
            dashboard.recent_files(),
        ));
    }

    if !dashboard.pending_files().is_empty() {
        out.push('\n');
        out.push_str(&render_pending(dashboard.pending_files()));
    }
    out
}
