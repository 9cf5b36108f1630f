//! Attendance report export.
//!
//! # Responsibility
//! - Filter records into an inclusive date range and summarize per student.
//! - Serialize report rows as CSV with stable column headers.
//!
//! # Invariants
//! - The range filter is inclusive on both ends.
//! - Every requested student gets a row, even with no records in range.

use crate::model::record::{AttendanceRecord, ISO_DATE_FORMAT};
use crate::model::student::Student;
use crate::store::AttendanceStore;
use crate::summary::aggregate::summarize;
use chrono::{Duration, NaiveDate};
use csv::WriterBuilder;
use log::info;
use serde::Serialize;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Length of the default report window ending today.
pub const DEFAULT_REPORT_WINDOW_DAYS: i64 = 30;

pub const REPORT_COLUMNS: [&str; 8] = [
    "Student Name",
    "Email",
    "Class",
    "Total Sessions",
    "Present",
    "Absent",
    "Late",
    "Attendance %",
];

pub type ExportResult<T> = Result<T, ExportError>;

#[derive(Debug)]
pub enum ExportError {
    Csv(csv::Error),
    Io(std::io::Error),
    /// `start` is after `end`.
    InvalidRange { start: NaiveDate, end: NaiveDate },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::InvalidRange { start, end } => {
                write!(f, "report start {start} is after end {end}")
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidRange { .. } => None,
        }
    }
}

impl From<csv::Error> for ExportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<std::io::Error> for ExportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// One report line per student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    #[serde(rename = "Student Name")]
    pub student_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Class")]
    pub class_name: String,
    #[serde(rename = "Total Sessions")]
    pub total_sessions: usize,
    #[serde(rename = "Present")]
    pub present: usize,
    #[serde(rename = "Absent")]
    pub absent: usize,
    #[serde(rename = "Late")]
    pub late: usize,
    /// Present percentage with two decimals, e.g. `66.67%`.
    #[serde(rename = "Attendance %")]
    pub attendance_percentage: String,
}

/// Report parameters: optional class filter and inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRequest {
    /// `None` reports on all students.
    pub class_name: Option<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ReportRequest {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            class_name: None,
            start,
            end,
        }
    }

    /// Window of [`DEFAULT_REPORT_WINDOW_DAYS`] ending at `today`.
    pub fn default_range(today: NaiveDate) -> Self {
        Self::new(today - Duration::days(DEFAULT_REPORT_WINDOW_DAYS), today)
    }

    pub fn for_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn file_name(&self) -> String {
        report_file_name(self.start, self.end)
    }
}

/// `attendance_report_<start>_to_<end>.csv`
pub fn report_file_name(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "attendance_report_{}_to_{}.csv",
        start.format(ISO_DATE_FORMAT),
        end.format(ISO_DATE_FORMAT)
    )
}

/// Builds report rows for `students`, in input order, counting only records
/// dated within `[start, end]`.
pub fn build_report(
    students: &[Student],
    records: &[AttendanceRecord],
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<ReportRow> {
    let mut by_student: HashMap<&str, Vec<&AttendanceRecord>> = HashMap::new();
    for record in records
        .iter()
        .filter(|record| record.date >= start && record.date <= end)
    {
        by_student
            .entry(record.student_id.as_str())
            .or_default()
            .push(record);
    }

    students
        .iter()
        .map(|student| {
            let summary = summarize(
                by_student
                    .get(student.id.as_str())
                    .into_iter()
                    .flatten()
                    .copied(),
            );
            ReportRow {
                student_name: student.name.clone(),
                email: student.email.clone(),
                class_name: student.class_name.clone(),
                total_sessions: summary.total,
                present: summary.present,
                absent: summary.absent,
                late: summary.late,
                attendance_percentage: summary.attendance_rate_label(),
            }
        })
        .collect()
}

/// Builds the report described by `request` from a store snapshot.
pub fn generate_report(
    store: &AttendanceStore,
    request: &ReportRequest,
) -> ExportResult<Vec<ReportRow>> {
    if request.start > request.end {
        return Err(ExportError::InvalidRange {
            start: request.start,
            end: request.end,
        });
    }

    let students: Vec<Student> = match request.class_name.as_deref() {
        Some(class_name) => store
            .students()
            .iter()
            .filter(|student| student.is_in_class(class_name))
            .cloned()
            .collect(),
        None => store.students().to_vec(),
    };
    let rows = build_report(&students, store.records(), request.start, request.end);
    info!(
        "event=report_generate module=spreadsheet status=ok rows={} start={} end={} class_filter={}",
        rows.len(),
        request.start,
        request.end,
        request.class_name.is_some()
    );
    Ok(rows)
}

/// Writes rows as CSV. The header row is always written.
pub fn write_report_csv<W: Write>(writer: W, rows: &[ReportRow]) -> ExportResult<()> {
    let mut out = WriterBuilder::new().has_headers(false).from_writer(writer);
    out.write_record(REPORT_COLUMNS)?;
    for row in rows {
        out.serialize(row)?;
    }
    out.flush()?;
    Ok(())
}

/// Creates (or truncates) `path` and writes the report into it.
pub fn write_report_file(path: impl AsRef<Path>, rows: &[ReportRow]) -> ExportResult<()> {
    let file = File::create(path.as_ref())?;
    write_report_csv(file, rows)
}
