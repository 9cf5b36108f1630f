// `attendance report` and `attendance template`.

use super::parse_date;
use attendance_core::{
    generate_report, import_today, write_report_file, write_sample_template, AttendanceService,
    ImportOptions, ReportRequest,
};
use chrono::{Local, NaiveDate};
use clap::Args;
use std::fs::File;
use std::path::PathBuf;

#[derive(Args)]
pub struct ReportArgs {
    /// First day of the report (defaults to 30 days before --end)
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// Last day of the report (defaults to today)
    #[arg(long, value_parser = parse_date)]
    end: Option<NaiveDate>,

    /// Only include students of this class
    #[arg(long = "class")]
    class_name: Option<String>,

    /// Directory the report file is written to
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Apply an upload (dated today) before building the report
    #[arg(long)]
    import: Option<PathBuf>,
}

impl ReportArgs {
    fn request(&self, today: NaiveDate) -> ReportRequest {
        let mut request = ReportRequest::default_range(self.end.unwrap_or(today));
        if let Some(start) = self.start {
            request.start = start;
        }
        request.class_name = self.class_name.clone();
        request
    }
}

#[derive(Args)]
pub struct TemplateArgs {
    /// Output file (prints to stdout when omitted)
    #[arg(long)]
    out: Option<PathBuf>,
}

pub fn run(args: ReportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut service = AttendanceService::seeded();
    if let Some(path) = &args.import {
        let batch = import_today(path, &ImportOptions::default())?;
        let summary = service.apply_import(batch);
        println!(
            "Imported {} students, {} records",
            summary.students_added, summary.records_applied
        );
    }

    let request = args.request(Local::now().date_naive());
    let rows = generate_report(service.store(), &request)?;
    let path = args.out.join(request.file_name());
    write_report_file(&path, &rows)?;

    println!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

pub fn run_template(args: TemplateArgs) -> Result<(), Box<dyn std::error::Error>> {
    match args.out {
        Some(path) => {
            write_sample_template(File::create(&path)?)?;
            println!("Wrote template to {}", path.display());
        }
        None => write_sample_template(std::io::stdout().lock())?,
    }
    Ok(())
}
