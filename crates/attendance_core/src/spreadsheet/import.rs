//! Attendance upload parsing.
//!
//! # Responsibility
//! - Turn `Name, Email, Class, Status, Notes` rows into students and records.
//! - Map free-text status cells onto the closed status set with an explicit,
//!   logged decision per row.
//!
//! # Invariants
//! - Header lookup tries the exact column name first, then a
//!   case-insensitive match.
//! - Every record of one batch carries the same import date.
//! - Rows whose mapped cells are all empty are skipped.
//! - A batch is either returned complete or not at all.

use super::{
    COLUMN_CLASS, COLUMN_EMAIL, COLUMN_NAME, COLUMN_NOTES, COLUMN_STATUS, UPLOAD_COLUMNS,
};
use crate::model::generate_id;
use crate::model::record::{AttendanceRecord, AttendanceStatus};
use crate::model::student::Student;
use chrono::{Local, NaiveDate};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

pub type ImportResult<T> = Result<T, ImportError>;

/// Failure while reading an attendance upload.
#[derive(Debug)]
pub enum ImportError {
    /// Malformed CSV content.
    Csv(csv::Error),
    /// File could not be opened or written.
    Io(std::io::Error),
    /// Header row has none of the `Name`, `Email`, `Class` columns.
    MissingHeader,
    /// Unrecognized status under [`UnknownStatusPolicy::Reject`].
    InvalidStatus { row: usize, value: String },
}

impl Display for ImportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Csv(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::MissingHeader => write!(
                f,
                "upload header must contain at least one of `{COLUMN_NAME}`, `{COLUMN_EMAIL}`, `{COLUMN_CLASS}`"
            ),
            Self::InvalidStatus { row, value } => write!(
                f,
                "row {row}: unsupported status `{value}`; expected present|absent|late"
            ),
        }
    }
}

impl Error for ImportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Csv(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::MissingHeader | Self::InvalidStatus { .. } => None,
        }
    }
}

impl From<csv::Error> for ImportError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}

impl From<std::io::Error> for ImportError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// What to do with a status cell outside `present|absent|late`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownStatusPolicy {
    /// Use [`ImportOptions::default_status`] and log a warning.
    #[default]
    Default,
    /// Fail the whole import.
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOptions {
    pub unknown_status: UnknownStatusPolicy,
    /// Status used for blank cells and, under the default policy, for
    /// unrecognized values.
    pub default_status: AttendanceStatus,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            unknown_status: UnknownStatusPolicy::Default,
            default_status: AttendanceStatus::Present,
        }
    }
}

/// How one row's status cell was interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusDecision {
    Parsed(AttendanceStatus),
    /// Cell was blank.
    DefaultedEmpty(AttendanceStatus),
    /// Cell held an unrecognized value.
    DefaultedUnknown {
        value: String,
        status: AttendanceStatus,
    },
}

impl StatusDecision {
    pub fn status(&self) -> AttendanceStatus {
        match self {
            Self::Parsed(status) | Self::DefaultedEmpty(status) => *status,
            Self::DefaultedUnknown { status, .. } => *status,
        }
    }
}

/// Fully parsed upload, ready to be applied to a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBatch {
    pub date: NaiveDate,
    pub students: Vec<Student>,
    /// One record per student, in row order.
    pub records: Vec<AttendanceRecord>,
    /// Parallel to `records`.
    pub status_decisions: Vec<StatusDecision>,
}

impl ImportBatch {
    pub fn len(&self) -> usize {
        self.students.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Number of rows whose status came from an unrecognized value.
    pub fn unknown_status_count(&self) -> usize {
        self.status_decisions
            .iter()
            .filter(|decision| matches!(decision, StatusDecision::DefaultedUnknown { .. }))
            .count()
    }
}

struct ColumnMap {
    name: Option<usize>,
    email: Option<usize>,
    class: Option<usize>,
    status: Option<usize>,
    notes: Option<usize>,
}

impl ColumnMap {
    fn resolve(headers: &StringRecord) -> ImportResult<Self> {
        let map = Self {
            name: find_column(headers, COLUMN_NAME),
            email: find_column(headers, COLUMN_EMAIL),
            class: find_column(headers, COLUMN_CLASS),
            status: find_column(headers, COLUMN_STATUS),
            notes: find_column(headers, COLUMN_NOTES),
        };
        if map.name.is_none() && map.email.is_none() && map.class.is_none() {
            return Err(ImportError::MissingHeader);
        }
        Ok(map)
    }

    /// Whether every mapped cell of `row` is empty.
    fn is_blank(&self, row: &StringRecord) -> bool {
        [self.name, self.email, self.class, self.status, self.notes]
            .into_iter()
            .all(|column| cell(row, column).is_empty())
    }
}

/// Parses an upload from any reader, stamping records with `date`.
pub fn parse_attendance_csv<R: Read>(
    reader: R,
    date: NaiveDate,
    options: &ImportOptions,
) -> ImportResult<ImportBatch> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    let columns = ColumnMap::resolve(reader.headers()?)?;

    let mut batch = ImportBatch {
        date,
        students: Vec::new(),
        records: Vec::new(),
        status_decisions: Vec::new(),
    };

    for (index, row) in reader.records().enumerate() {
        let row = row?;
        // Header is line 1.
        let line = index + 2;
        if columns.is_blank(&row) {
            debug!(
                "event=import_parse module=spreadsheet status=skip reason=blank_row row={}",
                line
            );
            continue;
        }

        let student = Student::with_id(
            generate_id("import"),
            cell(&row, columns.name),
            cell(&row, columns.email),
            cell(&row, columns.class),
        );
        let decision = resolve_status(cell(&row, columns.status), line, options)?;
        let mut record = AttendanceRecord::new(student.id.clone(), date, decision.status());
        let notes = cell(&row, columns.notes);
        if !notes.is_empty() {
            record.notes = Some(notes.to_string());
        }

        batch.students.push(student);
        batch.records.push(record);
        batch.status_decisions.push(decision);
    }

    info!(
        "event=import_parse module=spreadsheet status=ok rows={} unknown_status={} date={}",
        batch.len(),
        batch.unknown_status_count(),
        date
    );
    Ok(batch)
}

/// Opens and parses an upload file.
pub fn parse_attendance_file(
    path: impl AsRef<Path>,
    date: NaiveDate,
    options: &ImportOptions,
) -> ImportResult<ImportBatch> {
    let file = File::open(path.as_ref()).map_err(|err| {
        error!(
            "event=import_parse module=spreadsheet status=error error_code=open_failed error={}",
            err
        );
        ImportError::Io(err)
    })?;
    parse_attendance_csv(file, date, options)
}

/// Parses an upload file, stamping records with today's local calendar date.
pub fn import_today(path: impl AsRef<Path>, options: &ImportOptions) -> ImportResult<ImportBatch> {
    parse_attendance_file(path, Local::now().date_naive(), options)
}

/// Writes the two-row upload template.
pub fn write_sample_template<W: Write>(writer: W) -> ImportResult<()> {
    let mut out = WriterBuilder::new().from_writer(writer);
    out.write_record(UPLOAD_COLUMNS)?;
    out.write_record([
        "John Doe",
        "john.doe@example.com",
        "Mathematics 101",
        "present",
        "",
    ])?;
    out.write_record([
        "Jane Smith",
        "jane.smith@example.com",
        "Mathematics 101",
        "absent",
        "Sick",
    ])?;
    out.flush()?;
    Ok(())
}

fn find_column(headers: &StringRecord, column: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header == column)
        .or_else(|| {
            headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(column))
        })
}

fn cell(row: &StringRecord, column: Option<usize>) -> &str {
    column.and_then(|index| row.get(index)).unwrap_or("")
}

fn resolve_status(
    value: &str,
    line: usize,
    options: &ImportOptions,
) -> ImportResult<StatusDecision> {
    if value.is_empty() {
        return Ok(StatusDecision::DefaultedEmpty(options.default_status));
    }
    if let Some(status) = AttendanceStatus::parse(value) {
        return Ok(StatusDecision::Parsed(status));
    }

    match options.unknown_status {
        UnknownStatusPolicy::Default => {
            warn!(
                "event=import_status module=spreadsheet status=defaulted row={} fallback={}",
                line, options.default_status
            );
            Ok(StatusDecision::DefaultedUnknown {
                value: value.to_string(),
                status: options.default_status,
            })
        }
        UnknownStatusPolicy::Reject => {
            warn!(
                "event=import_status module=spreadsheet status=rejected row={}",
                line
            );
            Err(ImportError::InvalidStatus {
                row: line,
                value: value.to_string(),
            })
        }
    }
}
