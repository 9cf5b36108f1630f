// `attendance import`: parse an upload and apply it to the seeded roster.

use super::{parse_date, print_summary};
use attendance_core::{
    parse_attendance_file, AttendanceService, ImportOptions, StatusDecision,
    UnknownStatusPolicy,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

#[derive(Args)]
pub struct ImportArgs {
    /// CSV file with Name, Email, Class, Status, Notes columns
    file: PathBuf,

    /// Attendance date for every row (defaults to today)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Fail on status values other than present, absent or late
    #[arg(long)]
    strict: bool,
}

impl ImportArgs {
    fn options(&self) -> ImportOptions {
        ImportOptions {
            unknown_status: if self.strict {
                UnknownStatusPolicy::Reject
            } else {
                UnknownStatusPolicy::Default
            },
            ..ImportOptions::default()
        }
    }
}

pub fn run(args: ImportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let batch = parse_attendance_file(&args.file, date, &args.options())?;

    for (row, decision) in batch.status_decisions.iter().enumerate() {
        if let StatusDecision::DefaultedUnknown { value, status } = decision {
            println!("row {}: unknown status `{value}`, recorded as {status}", row + 2);
        }
    }

    let mut service = AttendanceService::seeded();
    let summary = service.apply_import(batch);

    println!(
        "Imported {} students ({} skipped), {} records for {date}",
        summary.students_added, summary.students_skipped, summary.records_applied
    );
    print_summary(
        &format!("Attendance on {date}"),
        &service.daily_summary(date),
    );
    Ok(())
}
