pub mod import;
pub mod report;
pub mod summary;

use attendance_core::{parse_iso_date, Summary};
use chrono::NaiveDate;

/// clap value parser for `YYYY-MM-DD` arguments.
pub fn parse_date(value: &str) -> Result<NaiveDate, String> {
    parse_iso_date(value).map_err(|err| format!("expected YYYY-MM-DD, got `{value}`: {err}"))
}

pub fn print_summary(label: &str, summary: &Summary) {
    println!("{label}");
    println!("  total:   {}", summary.total);
    println!(
        "  present: {} ({:.1}%)",
        summary.present, summary.present_percentage
    );
    println!(
        "  absent:  {} ({:.1}%)",
        summary.absent, summary.absent_percentage
    );
    println!("  late:    {} ({:.1}%)", summary.late, summary.late_percentage);
}

#[cfg(test)]
mod tests {
    use super::parse_date;

    #[test]
    fn parse_date_accepts_iso_only() {
        assert_eq!(parse_date("2025-04-07").unwrap().to_string(), "2025-04-07");
        assert!(parse_date("04/07/2025").unwrap_err().contains("YYYY-MM-DD"));
    }
}
