use attendance_core::{
    best_and_worst_weekday, class_breakdown, parse_iso_date, recent_records, summarize,
    top_absentees, weekday_patterns, AttendanceRecord, AttendanceStatus, AttendanceStore,
    Student,
};
use chrono::Weekday;

fn record(student: &str, date: &str, status: AttendanceStatus) -> AttendanceRecord {
    AttendanceRecord::new(student, parse_iso_date(date).unwrap(), status)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn summary_counts_and_percentages() {
    use AttendanceStatus::{Absent, Late, Present};
    let records = vec![
        record("s1", "2025-04-07", Present),
        record("s2", "2025-04-07", Present),
        record("s3", "2025-04-07", Absent),
        record("s4", "2025-04-07", Late),
        record("s5", "2025-04-07", Late),
        record("s6", "2025-04-07", Late),
    ];

    let summary = summarize(&records);
    assert_eq!(summary.total, 6);
    assert_eq!(summary.present, 2);
    assert_eq!(summary.absent, 1);
    assert_eq!(summary.late, 3);
    assert_close(summary.present_percentage, 2.0 / 6.0 * 100.0);
    assert_close(summary.absent_percentage, 1.0 / 6.0 * 100.0);
    assert_close(summary.late_percentage, 50.0);
    assert_eq!(summary.attendance_rate_label(), "33.33%");
    assert_eq!(summary.count(Late), 3);
}

#[test]
fn summary_of_nothing_is_all_zero() {
    let empty: Vec<AttendanceRecord> = Vec::new();
    let summary = summarize(&empty);
    assert_eq!(summary.total, 0);
    assert_eq!(summary.present_percentage, 0.0);
    assert_eq!(summary.absent_percentage, 0.0);
    assert_eq!(summary.late_percentage, 0.0);
    assert_eq!(summary.attendance_rate_label(), "0.00%");
}

#[test]
fn class_breakdown_follows_class_order() {
    let store = AttendanceStore::seeded();
    let breakdown = class_breakdown(&store);

    let rows: Vec<_> = breakdown
        .iter()
        .map(|c| (c.class_name.as_str(), c.present, c.absent, c.late))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("Mathematics 101", 3, 1, 0),
            ("Physics 202", 2, 1, 1),
            ("Chemistry 303", 1, 0, 1),
        ]
    );
}

#[test]
fn weekday_patterns_group_by_weekday_monday_first() {
    let store = AttendanceStore::seeded();
    let patterns = weekday_patterns(store.records());

    // 2025-04-07 is a Monday, 2025-04-06 a Sunday.
    assert_eq!(patterns.len(), 2);
    assert_eq!(patterns[0].weekday, Weekday::Mon);
    assert_eq!(patterns[1].weekday, Weekday::Sun);
    assert_eq!(patterns[0].total, 5);
    assert_close(patterns[0].attendance_rate, 60.0);
    assert_close(patterns[0].late_rate, 20.0);
}

#[test]
fn best_and_worst_weekday_by_attendance_rate() {
    use AttendanceStatus::{Absent, Present};
    let records = vec![
        record("s1", "2025-04-08", Present), // Tuesday
        record("s2", "2025-04-08", Present),
        record("s1", "2025-04-11", Absent), // Friday
        record("s2", "2025-04-11", Present),
        record("s1", "2025-04-09", Absent), // Wednesday
    ];

    let (best, worst) = best_and_worst_weekday(&records).unwrap();
    assert_eq!(best.weekday, Weekday::Tue);
    assert_eq!(worst.weekday, Weekday::Wed);
}

#[test]
fn best_and_worst_ties_keep_earliest_weekday() {
    let store = AttendanceStore::seeded();
    let (best, worst) = best_and_worst_weekday(store.records()).unwrap();
    assert_eq!(best.weekday, Weekday::Mon);
    assert_eq!(worst.weekday, Weekday::Mon);

    let empty: Vec<AttendanceRecord> = Vec::new();
    assert!(best_and_worst_weekday(&empty).is_none());
}

#[test]
fn recent_records_are_newest_first_and_limited() {
    use AttendanceStatus::Present;
    let records = vec![
        record("s1", "2025-04-01", Present),
        record("s1", "2025-04-09", Present),
        record("s1", "2025-04-03", Present),
        record("s1", "2025-04-05", Present),
    ];

    let recent = recent_records(&records, 3);
    let dates: Vec<_> = recent.iter().map(|r| r.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-04-09", "2025-04-05", "2025-04-03"]);
}

fn roster(count: usize) -> Vec<Student> {
    (1..=count)
        .map(|n| {
            Student::with_id(
                format!("s{n}"),
                format!("Student {n}"),
                format!("s{n}@example.com"),
                "Art 1",
            )
        })
        .collect()
}

#[test]
fn top_absentees_rank_by_absent_percentage() {
    use AttendanceStatus::{Absent, Late, Present};
    let students = roster(3);
    let records = vec![
        record("s1", "2025-04-07", Absent),
        record("s1", "2025-04-08", Present),
        record("s1", "2025-04-09", Present),
        record("s1", "2025-04-10", Present),
        record("s2", "2025-04-07", Absent),
        record("s2", "2025-04-08", Absent),
        record("s2", "2025-04-09", Late),
        record("s3", "2025-04-07", Late),
    ];

    let ranked = top_absentees(&students, &records, 5);
    let ids: Vec<_> = ranked.iter().map(|r| r.student.id.as_str()).collect();
    assert_eq!(ids, vec!["s2", "s1"]);
    assert_close(ranked[0].summary.absent_percentage, 2.0 / 3.0 * 100.0);
    assert_close(ranked[1].summary.absent_percentage, 25.0);
}

#[test]
fn top_absentees_skip_students_without_absences() {
    let store = AttendanceStore::seeded();
    let ranked = top_absentees(store.students(), store.records(), 5);

    // Jane and Michael each missed one of two sessions; ties keep roster order.
    let ids: Vec<_> = ranked.iter().map(|r| r.student.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "3"]);
    assert!(ranked.iter().all(|r| r.summary.absent > 0));

    let empty: Vec<AttendanceRecord> = Vec::new();
    assert!(top_absentees(store.students(), &empty, 5).is_empty());
}

#[test]
fn top_absentees_respect_limit() {
    let students = roster(7);
    let records: Vec<_> = students
        .iter()
        .map(|s| record(&s.id, "2025-04-07", AttendanceStatus::Absent))
        .collect();

    assert_eq!(top_absentees(&students, &records, 5).len(), 5);
    assert_eq!(top_absentees(&students, &records, 2).len(), 2);
}
