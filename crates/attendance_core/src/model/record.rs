//! Attendance record model.
//!
//! # Responsibility
//! - Define one attendance mark for one student on one calendar date.
//! - Provide the composite key used by upsert semantics.
//!
//! # Invariants
//! - `date` has no time component and serializes as `YYYY-MM-DD`.
//! - `status` is one of the closed set `present|absent|late`.

use super::generate_id;
use super::student::StudentId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub type RecordId = String;

/// Date format used by records, reports and CLI arguments.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses an ISO `YYYY-MM-DD` calendar date.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT)
}

/// Attendance mark for a single session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    pub const ALL: [AttendanceStatus; 3] = [Self::Present, Self::Absent, Self::Late];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
            Self::Late => "late",
        }
    }

    /// Parses a status label, ignoring surrounding whitespace and case.
    ///
    /// Returns `None` for anything outside `present|absent|late`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "present" => Some(Self::Present),
            "absent" => Some(Self::Absent),
            "late" => Some(Self::Late),
            _ => None,
        }
    }
}

impl Display for AttendanceStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Composite identity `(student_id, date)` of an attendance record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub student_id: StudentId,
    pub date: NaiveDate,
}

impl Display for RecordKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.student_id, self.date.format(ISO_DATE_FORMAT))
    }
}

/// One attendance entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Surrogate key; not part of the composite identity.
    pub id: RecordId,
    pub student_id: StudentId,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AttendanceRecord {
    /// Creates a record with a generated `record-<uuid>` id and no notes.
    pub fn new(student_id: impl Into<StudentId>, date: NaiveDate, status: AttendanceStatus) -> Self {
        Self::with_id(generate_id("record"), student_id, date, status)
    }

    pub fn with_id(
        id: impl Into<RecordId>,
        student_id: impl Into<StudentId>,
        date: NaiveDate,
        status: AttendanceStatus,
    ) -> Self {
        Self {
            id: id.into(),
            student_id: student_id.into(),
            date,
            status,
            notes: None,
        }
    }

    /// Builder-style setter for free-text notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            student_id: self.student_id.clone(),
            date: self.date,
        }
    }
}
