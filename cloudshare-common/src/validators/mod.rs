//! Input validation functions
//!
//! Client-side checks applied before any request is sent.

mod file_count;

pub use file_count::{FileCountError, validate_batch, validate_selection};
