// `attendance summary` and `attendance absentees` over the seeded roster.

use super::{parse_date, print_summary};
use attendance_core::{best_and_worst_weekday, class_breakdown, AttendanceService};
use chrono::NaiveDate;
use clap::Args;

#[derive(Args)]
pub struct SummaryArgs {
    /// Restrict the summary to one day (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: Option<NaiveDate>,

    /// Rank absentees within this class only
    #[arg(long = "class")]
    class_name: Option<String>,
}

#[derive(Args)]
pub struct AbsenteesArgs {
    /// Day to inspect (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date: NaiveDate,
}

pub fn run(args: SummaryArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = AttendanceService::seeded();

    if let Some(date) = args.date {
        print_summary(&format!("Attendance on {date}"), &service.daily_summary(date));
        return Ok(());
    }

    print_summary("Overall attendance", &service.overall_summary());

    println!();
    println!("By class");
    for class in class_breakdown(service.store()) {
        println!(
            "  {:<20} present={} absent={} late={}",
            class.class_name, class.present, class.absent, class.late
        );
    }

    let absentees = service.top_absentees(args.class_name.as_deref());
    if !absentees.is_empty() {
        println!();
        println!("Top absentees");
        for rank in absentees {
            println!(
                "  {:<20} {:<16} {:.1}% absent",
                rank.student.name, rank.student.class_name, rank.summary.absent_percentage
            );
        }
    }

    if let Some((best, worst)) = best_and_worst_weekday(service.store().records()) {
        println!();
        println!(
            "Best day:  {} ({:.1}% present)",
            best.weekday, best.attendance_rate
        );
        println!(
            "Worst day: {} ({:.1}% present)",
            worst.weekday, worst.attendance_rate
        );
    }
    Ok(())
}

pub fn run_absentees(args: AbsenteesArgs) -> Result<(), Box<dyn std::error::Error>> {
    let service = AttendanceService::seeded();
    let absentees = service.store().get_absentees(args.date);

    if absentees.is_empty() {
        println!("No absences on {}", args.date);
        return Ok(());
    }

    println!("Absent on {}", args.date);
    for student in absentees {
        let notes = service
            .store()
            .find_record(&student.id, args.date)
            .and_then(|record| record.notes.as_deref())
            .unwrap_or("-");
        println!(
            "  {} <{}> {} [{}]",
            student.name, student.email, student.class_name, notes
        );
    }
    Ok(())
}
