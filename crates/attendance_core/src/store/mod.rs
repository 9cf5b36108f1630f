//! In-memory attendance store.
//!
//! # Responsibility
//! - Own the student, class and attendance-record collections.
//! - Keep cross-collection consistency rules in one place.
//!
//! # Invariants
//! - At most one record per `(student_id, date)`; writes are upserts.
//! - `ClassInfo::student_count` matches the roster after every student write.
//! - Store operations are total: lookups that miss return empty results.

mod attendance_store;
mod seed;

pub use attendance_store::{AttendanceStore, ClassAttendance};
