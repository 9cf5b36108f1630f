//! CSV spreadsheet boundary.
//!
//! # Responsibility
//! - Parse attendance uploads into a complete batch before any store write.
//! - Render attendance reports and the upload template.
//!
//! # Invariants
//! - Parsers never touch `AttendanceStore`; they hand off finished batches.
//! - Date-range filtering for reports lives here, not in the store.

pub mod export;
pub mod import;

/// Upload column headers, in template order.
pub const COLUMN_NAME: &str = "Name";
pub const COLUMN_EMAIL: &str = "Email";
pub const COLUMN_CLASS: &str = "Class";
pub const COLUMN_STATUS: &str = "Status";
pub const COLUMN_NOTES: &str = "Notes";

pub const UPLOAD_COLUMNS: [&str; 5] = [
    COLUMN_NAME,
    COLUMN_EMAIL,
    COLUMN_CLASS,
    COLUMN_STATUS,
    COLUMN_NOTES,
];
