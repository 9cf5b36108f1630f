//! Attendance domain model.
//!
//! # Responsibility
//! - Define the three entity shapes shared by store, import and export.
//! - Keep wire naming (`studentId`, `userId`, `studentCount`) stable for
//!   callers that serialize snapshots.
//!
//! # Invariants
//! - Classes are related to students and records by `name`, never by `id`.
//! - `(student_id, date)` identifies at most one attendance record.

pub mod class_info;
pub mod record;
pub mod student;

use uuid::Uuid;

/// Builds a surrogate identifier such as `student-<uuid-v4>`.
pub(crate) fn generate_id(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}
