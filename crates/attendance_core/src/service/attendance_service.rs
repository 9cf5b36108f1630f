//! Attendance use-case service.
//!
//! # Responsibility
//! - Validate form-style input before it reaches the store.
//! - Apply parsed import batches in one hand-off.
//! - Serve student self-service flows resolved through `user_id`.
//!
//! # Invariants
//! - The service owns exactly one store; there is no shared global state.
//! - Absence explanations never change a record's status.

use crate::model::record::{AttendanceRecord, AttendanceStatus};
use crate::model::student::{Student, StudentId, StudentValidationError};
use crate::spreadsheet::import::ImportBatch;
use crate::store::AttendanceStore;
use crate::summary::aggregate::{summarize, Summary};
use crate::summary::analytics::{
    recent_records, top_absentees, AbsenteeRank, RECENT_RECORDS_LIMIT, TOP_ABSENTEES_LIMIT,
};
use chrono::{Datelike, Duration, NaiveDate};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Weekdays shown by the weekly grid (Monday to Friday).
const SCHOOL_DAYS_PER_WEEK: i64 = 5;

/// Service error for attendance use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// A required student field is blank.
    InvalidStudent(StudentValidationError),
    /// Email does not look like `local@domain.tld`.
    InvalidEmail(String),
    /// Explanation text is blank.
    EmptyExplanation,
    /// No student is linked to the given user identity.
    StudentNotFound(String),
    /// The student has no record on the given date.
    RecordNotFound { student_id: StudentId, date: NaiveDate },
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidStudent(err) => write!(f, "{err}"),
            Self::InvalidEmail(value) => write!(f, "invalid email: `{value}`"),
            Self::EmptyExplanation => write!(f, "explanation cannot be empty"),
            Self::StudentNotFound(user_id) => {
                write!(f, "no student linked to user `{user_id}`")
            }
            Self::RecordNotFound { student_id, date } => {
                write!(f, "no attendance record for student {student_id} on {date}")
            }
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidStudent(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StudentValidationError> for ServiceError {
    fn from(value: StudentValidationError) -> Self {
        Self::InvalidStudent(value)
    }
}

/// Outcome of applying an import batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub students_added: usize,
    pub students_skipped: usize,
    pub records_applied: usize,
    pub statuses_defaulted: usize,
}

/// One student's row in the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyRow {
    pub student: Student,
    /// Parallel to [`WeeklyGrid::days`]; `None` means no record that day.
    pub statuses: Vec<Option<AttendanceStatus>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyGrid {
    /// Monday through Friday of the requested week.
    pub days: Vec<NaiveDate>,
    pub rows: Vec<WeeklyRow>,
}

/// Everything the student dashboard shows for one student.
#[derive(Debug, Clone, PartialEq)]
pub struct StudentOverview {
    pub student: Student,
    pub records: Vec<AttendanceRecord>,
    pub summary: Summary,
    /// Newest first, at most [`RECENT_RECORDS_LIMIT`].
    pub recent: Vec<AttendanceRecord>,
}

/// Use-case facade over one [`AttendanceStore`].
#[derive(Debug, Clone, Default)]
pub struct AttendanceService {
    store: AttendanceStore,
}

impl AttendanceService {
    pub fn new(store: AttendanceStore) -> Self {
        Self { store }
    }

    /// Service over the demo-seeded store.
    pub fn seeded() -> Self {
        Self::new(AttendanceStore::seeded())
    }

    pub fn store(&self) -> &AttendanceStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut AttendanceStore {
        &mut self.store
    }

    pub fn into_store(self) -> AttendanceStore {
        self.store
    }

    /// Registers one student from form input.
    ///
    /// # Contract
    /// - Name, email and class must be non-blank; values are trimmed.
    /// - Email must match `local@domain.tld`.
    /// - Returns the stored student with its generated id.
    pub fn register_student(
        &mut self,
        name: &str,
        email: &str,
        class_name: &str,
    ) -> Result<Student, ServiceError> {
        let student = Student::new(name.trim(), email.trim(), class_name.trim());
        student.validate()?;
        if !EMAIL_RE.is_match(&student.email) {
            return Err(ServiceError::InvalidEmail(student.email));
        }

        self.store.add_students(vec![student.clone()]);
        Ok(student)
    }

    /// Hands a parsed batch to the store: students first, then records.
    pub fn apply_import(&mut self, batch: ImportBatch) -> ImportSummary {
        let statuses_defaulted = batch.unknown_status_count();
        let offered = batch.students.len();
        let records_applied = batch.records.len();

        let students_added = self.store.add_students(batch.students);
        self.store.add_attendance_records(batch.records);

        let summary = ImportSummary {
            students_added,
            students_skipped: offered - students_added,
            records_applied,
            statuses_defaulted,
        };
        info!(
            "event=import_apply module=service status=ok students_added={} students_skipped={} records={} statuses_defaulted={}",
            summary.students_added,
            summary.students_skipped,
            summary.records_applied,
            summary.statuses_defaulted
        );
        summary
    }

    /// Attaches a student's explanation to their record on `date`.
    ///
    /// The record keeps its status; notes are replaced with the trimmed
    /// explanation.
    pub fn submit_absence_explanation(
        &mut self,
        user_id: &str,
        date: NaiveDate,
        explanation: &str,
    ) -> Result<AttendanceRecord, ServiceError> {
        let explanation = explanation.trim();
        if explanation.is_empty() {
            return Err(ServiceError::EmptyExplanation);
        }

        let student_id = self
            .store
            .get_student_by_user_id(user_id)
            .map(|student| student.id.clone())
            .ok_or_else(|| ServiceError::StudentNotFound(user_id.to_string()))?;

        let Some(record) = self.store.find_record(&student_id, date).cloned() else {
            warn!(
                "event=absence_explanation module=service status=error error_code=record_not_found student_id={} date={}",
                student_id, date
            );
            return Err(ServiceError::RecordNotFound { student_id, date });
        };

        self.store
            .update_attendance_record(&record.id, record.status, Some(explanation.to_string()));

        Ok(AttendanceRecord {
            notes: Some(explanation.to_string()),
            ..record
        })
    }

    /// Monday-to-Friday status grid for the week containing `week_of`.
    ///
    /// `class_name = None` includes every student.
    pub fn weekly_grid(&self, class_name: Option<&str>, week_of: NaiveDate) -> WeeklyGrid {
        let monday =
            week_of - Duration::days(i64::from(week_of.weekday().num_days_from_monday()));
        let days: Vec<NaiveDate> = (0..SCHOOL_DAYS_PER_WEEK)
            .map(|offset| monday + Duration::days(offset))
            .collect();

        let rows = self
            .store
            .students()
            .iter()
            .filter(|student| class_name.map_or(true, |name| student.is_in_class(name)))
            .map(|student| WeeklyRow {
                student: student.clone(),
                statuses: days
                    .iter()
                    .map(|day| {
                        self.store
                            .find_record(&student.id, *day)
                            .map(|record| record.status)
                    })
                    .collect(),
            })
            .collect();

        WeeklyGrid { days, rows }
    }

    /// Case-insensitive substring search over name and email, optionally
    /// restricted to one class.
    pub fn search_students(&self, query: &str, class_name: Option<&str>) -> Vec<Student> {
        let needle = query.trim().to_lowercase();
        self.store
            .students()
            .iter()
            .filter(|student| class_name.map_or(true, |name| student.is_in_class(name)))
            .filter(|student| {
                student.name.to_lowercase().contains(&needle)
                    || student.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Records, summary and most recent marks of one student.
    pub fn student_overview(&self, student_id: &str) -> Option<StudentOverview> {
        let student = self.store.find_student(student_id)?.clone();
        let records = self.store.get_student_attendance(student_id);
        let summary = summarize(&records);
        let recent = recent_records(&records, RECENT_RECORDS_LIMIT);
        Some(StudentOverview {
            student,
            records,
            summary,
            recent,
        })
    }

    /// Up to [`TOP_ABSENTEES_LIMIT`] students ranked by absent percentage,
    /// within one class when `class_name` is given.
    pub fn top_absentees(&self, class_name: Option<&str>) -> Vec<AbsenteeRank> {
        match class_name {
            Some(name) => {
                let attendance = self.store.get_class_attendance(name);
                top_absentees(&attendance.students, &attendance.records, TOP_ABSENTEES_LIMIT)
            }
            None => top_absentees(
                self.store.students(),
                self.store.records(),
                TOP_ABSENTEES_LIMIT,
            ),
        }
    }

    pub fn daily_summary(&self, date: NaiveDate) -> Summary {
        summarize(&self.store.get_attendance_by_date(date))
    }

    pub fn overall_summary(&self) -> Summary {
        summarize(self.store.records())
    }
}

#[cfg(test)]
mod tests {
    use super::EMAIL_RE;

    #[test]
    fn email_pattern_requires_domain_with_dot() {
        assert!(EMAIL_RE.is_match("ann@example.com"));
        assert!(!EMAIL_RE.is_match("ann@example"));
        assert!(!EMAIL_RE.is_match("ann example@x.com"));
    }
}
