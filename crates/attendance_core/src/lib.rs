//! Core attendance logic: roster, daily marks and their summaries.
//! This crate is the single source of truth for attendance invariants.

pub mod logging;
pub mod model;
pub mod service;
pub mod spreadsheet;
pub mod store;
pub mod summary;

pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::class_info::{ClassId, ClassInfo};
pub use model::record::{
    parse_iso_date, AttendanceRecord, AttendanceStatus, RecordId, RecordKey, ISO_DATE_FORMAT,
};
pub use model::student::{Student, StudentId, StudentValidationError};
pub use service::attendance_service::{
    AttendanceService, ImportSummary, ServiceError, StudentOverview, WeeklyGrid, WeeklyRow,
};
pub use spreadsheet::export::{
    build_report, generate_report, report_file_name, write_report_csv, write_report_file,
    ExportError, ExportResult, ReportRequest, ReportRow, DEFAULT_REPORT_WINDOW_DAYS,
    REPORT_COLUMNS,
};
pub use spreadsheet::import::{
    import_today, parse_attendance_csv, parse_attendance_file, write_sample_template,
    ImportBatch, ImportError, ImportOptions, ImportResult, StatusDecision, UnknownStatusPolicy,
};
pub use store::{AttendanceStore, ClassAttendance};
pub use summary::aggregate::{summarize, Summary};
pub use summary::analytics::{
    best_and_worst_weekday, class_breakdown, recent_records, top_absentees, weekday_patterns,
    AbsenteeRank, ClassBreakdown, WeekdayPattern, RECENT_RECORDS_LIMIT, TOP_ABSENTEES_LIMIT,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
