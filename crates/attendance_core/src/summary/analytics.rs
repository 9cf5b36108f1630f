//! Dashboard analytics derived from summaries.
//!
//! # Responsibility
//! - Per-class status breakdown for charting.
//! - Weekday attendance patterns and best/worst day detection.
//! - Most-recent-first record slices for roster views.
//! - Ranking of students by absence rate.

use super::aggregate::{percentage, summarize, Summary};
use crate::model::record::{AttendanceRecord, AttendanceStatus};
use crate::model::student::Student;
use crate::store::AttendanceStore;
use chrono::{Datelike, Weekday};
use std::collections::{BTreeMap, HashMap};

/// Number of recent records shown next to each student.
pub const RECENT_RECORDS_LIMIT: usize = 3;

/// Number of students listed in the absence ranking.
pub const TOP_ABSENTEES_LIMIT: usize = 5;

/// Status counts for one class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBreakdown {
    pub class_name: String,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
}

/// Attendance aggregated over every record falling on one weekday.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekdayPattern {
    pub weekday: Weekday,
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    /// `present / total * 100`.
    pub attendance_rate: f64,
    /// `late / total * 100`.
    pub late_rate: f64,
}

/// One entry of the absence ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct AbsenteeRank {
    pub student: Student,
    /// Summary over the student's records in the ranked set.
    pub summary: Summary,
}

/// Breaks down each known class (in class order) by status.
pub fn class_breakdown(store: &AttendanceStore) -> Vec<ClassBreakdown> {
    store
        .classes()
        .iter()
        .map(|class| {
            let attendance = store.get_class_attendance(&class.name);
            let summary = summarize(&attendance.records);
            ClassBreakdown {
                class_name: class.name.clone(),
                present: summary.present,
                absent: summary.absent,
                late: summary.late,
            }
        })
        .collect()
}

/// Groups records by weekday, Monday first. Weekdays without records are
/// omitted.
pub fn weekday_patterns<'a, I>(records: I) -> Vec<WeekdayPattern>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let mut counts: BTreeMap<u32, (Weekday, [usize; 3])> = BTreeMap::new();
    for record in records {
        let weekday = record.date.weekday();
        let (_, slot) = counts
            .entry(weekday.num_days_from_monday())
            .or_insert((weekday, [0; 3]));
        let index = match record.status {
            AttendanceStatus::Present => 0,
            AttendanceStatus::Absent => 1,
            AttendanceStatus::Late => 2,
        };
        slot[index] += 1;
    }

    counts
        .into_values()
        .map(|(weekday, [present, absent, late])| {
            let total = present + absent + late;
            WeekdayPattern {
                weekday,
                total,
                present,
                absent,
                late,
                attendance_rate: percentage(present, total),
                late_rate: percentage(late, total),
            }
        })
        .collect()
}

/// Returns `(best, worst)` weekdays by attendance rate.
///
/// Ties keep the earlier weekday. Returns `None` when there are no records.
pub fn best_and_worst_weekday<'a, I>(records: I) -> Option<(WeekdayPattern, WeekdayPattern)>
where
    I: IntoIterator<Item = &'a AttendanceRecord>,
{
    let patterns = weekday_patterns(records);
    let first = *patterns.first()?;
    let (best, worst) = patterns
        .iter()
        .skip(1)
        .fold((first, first), |(best, worst), pattern| {
            let best = if pattern.attendance_rate > best.attendance_rate {
                *pattern
            } else {
                best
            };
            let worst = if pattern.attendance_rate < worst.attendance_rate {
                *pattern
            } else {
                worst
            };
            (best, worst)
        });
    Some((best, worst))
}

/// Returns up to `limit` records, newest date first.
pub fn recent_records(records: &[AttendanceRecord], limit: usize) -> Vec<AttendanceRecord> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

/// Students with at least one absence, highest absent percentage first.
///
/// Only `records` are counted, so callers pass a class or date subset to rank
/// within it. Ties keep roster order. At most `limit` entries are returned.
pub fn top_absentees(
    students: &[Student],
    records: &[AttendanceRecord],
    limit: usize,
) -> Vec<AbsenteeRank> {
    let mut by_student: HashMap<&str, Vec<&AttendanceRecord>> = HashMap::new();
    for record in records {
        by_student
            .entry(record.student_id.as_str())
            .or_default()
            .push(record);
    }

    let mut ranked: Vec<AbsenteeRank> = students
        .iter()
        .map(|student| AbsenteeRank {
            student: student.clone(),
            summary: summarize(
                by_student
                    .get(student.id.as_str())
                    .into_iter()
                    .flatten()
                    .copied(),
            ),
        })
        .filter(|rank| rank.summary.absent_percentage > 0.0)
        .collect();
    ranked.sort_by(|a, b| {
        b.summary
            .absent_percentage
            .total_cmp(&a.summary.absent_percentage)
    });
    ranked.truncate(limit);
    ranked
}
