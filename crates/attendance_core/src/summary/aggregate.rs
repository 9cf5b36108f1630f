//! Record-list summary.

use crate::model::record::{AttendanceRecord, AttendanceStatus};
use serde::Serialize;

/// Counts and percentages over a set of records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub present_percentage: f64,
    pub absent_percentage: f64,
    pub late_percentage: f64,
}

impl Summary {
    pub fn count(&self, status: AttendanceStatus) -> usize {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Absent => self.absent,
            AttendanceStatus::Late => self.late,
        }
    }

    /// Present percentage as shown in reports, e.g. `66.67%`.
    pub fn attendance_rate_label(&self) -> String {
        format!("{:.2}%", self.present_percentage)
    }
}

/// Summarizes any sequence of borrowed records.
///
/// Each percentage is `count / total * 100`; all are `0.0` when the input is
/// empty.
pub fn summarize<'a, I>(records: I) -> Summary
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut summary = Summary::default();
    for record in records {
        summary.total += 1;
        match record.status {
            AttendanceStatus::Present => summary.present += 1,
            AttendanceStatus::Absent => summary.absent += 1,
            AttendanceStatus::Late => summary.late += 1,
        }
    }

    summary.present_percentage = percentage(summary.present, summary.total);
    summary.absent_percentage = percentage(summary.absent, summary.total);
    summary.late_percentage = percentage(summary.late, summary.total);
    summary
}

pub(crate) fn percentage(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64 * 100.0
}
