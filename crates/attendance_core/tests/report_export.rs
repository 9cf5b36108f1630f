use attendance_core::{
    build_report, generate_report, parse_iso_date, write_report_csv, write_report_file,
    AttendanceRecord, AttendanceStatus, AttendanceStore, ExportError, ReportRequest, Student,
};

fn day(value: &str) -> chrono::NaiveDate {
    parse_iso_date(value).unwrap()
}

#[test]
fn range_is_inclusive_on_both_ends() {
    let store = AttendanceStore::seeded();
    let request = ReportRequest::new(day("2025-04-06"), day("2025-04-07"));
    let rows = generate_report(&store, &request).unwrap();

    assert_eq!(rows.len(), 5);
    let jane = rows.iter().find(|r| r.student_name == "Jane Smith").unwrap();
    assert_eq!(jane.total_sessions, 2);
    assert_eq!(jane.present, 1);
    assert_eq!(jane.absent, 1);
    assert_eq!(jane.attendance_percentage, "50.00%");

    let single_day = ReportRequest::new(day("2025-04-07"), day("2025-04-07"));
    let rows = generate_report(&store, &single_day).unwrap();
    assert!(rows.iter().all(|r| r.total_sessions == 1));
}

#[test]
fn students_without_records_in_range_get_zero_rows() {
    let store = AttendanceStore::seeded();
    let request = ReportRequest::new(day("2025-05-01"), day("2025-05-31"));
    let rows = generate_report(&store, &request).unwrap();

    assert_eq!(rows.len(), 5);
    for row in &rows {
        assert_eq!(row.total_sessions, 0);
        assert_eq!(row.present + row.absent + row.late, 0);
        assert_eq!(row.attendance_percentage, "0.00%");
    }
}

#[test]
fn class_filter_limits_rows_to_roster() {
    let store = AttendanceStore::seeded();
    let request =
        ReportRequest::new(day("2025-04-01"), day("2025-04-30")).for_class("Physics 202");
    let rows = generate_report(&store, &request).unwrap();

    let names: Vec<_> = rows.iter().map(|r| r.student_name.as_str()).collect();
    assert_eq!(names, vec!["Michael Johnson", "Emily Davis"]);
    assert_eq!(rows[0].late, 1);
    assert_eq!(rows[0].absent, 1);
}

#[test]
fn reversed_range_is_rejected() {
    let store = AttendanceStore::seeded();
    let request = ReportRequest::new(day("2025-04-08"), day("2025-04-01"));
    let err = generate_report(&store, &request).unwrap_err();
    assert!(matches!(err, ExportError::InvalidRange { .. }));
}

#[test]
fn percentage_label_uses_two_decimals() {
    let students = vec![Student::with_id("s1", "Ann", "ann@example.com", "Art 1")];
    let records = vec![
        AttendanceRecord::new("s1", day("2025-04-01"), AttendanceStatus::Present),
        AttendanceRecord::new("s1", day("2025-04-02"), AttendanceStatus::Present),
        AttendanceRecord::new("s1", day("2025-04-03"), AttendanceStatus::Late),
        // Outside the range.
        AttendanceRecord::new("s1", day("2025-04-04"), AttendanceStatus::Absent),
    ];

    let rows = build_report(&students, &records, day("2025-04-01"), day("2025-04-03"));
    assert_eq!(rows[0].total_sessions, 3);
    assert_eq!(rows[0].attendance_percentage, "66.67%");
}

#[test]
fn csv_output_has_header_then_one_line_per_row() {
    let store = AttendanceStore::seeded();
    let request =
        ReportRequest::new(day("2025-04-06"), day("2025-04-07")).for_class("Chemistry 303");
    let rows = generate_report(&store, &request).unwrap();

    let mut buffer = Vec::new();
    write_report_csv(&mut buffer, &rows).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(
        lines[0],
        "Student Name,Email,Class,Total Sessions,Present,Absent,Late,Attendance %"
    );
    assert_eq!(
        lines[1],
        "Robert Wilson,robert.w@example.com,Chemistry 303,2,1,0,1,50.00%"
    );
    assert_eq!(lines.len(), 2);
}

#[test]
fn empty_report_still_writes_header() {
    let mut buffer = Vec::new();
    write_report_csv(&mut buffer, &[]).unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "Student Name,Email,Class,Total Sessions,Present,Absent,Late,Attendance %\n"
    );
}

#[test]
fn report_file_is_written_under_default_name() {
    let store = AttendanceStore::seeded();
    let request = ReportRequest::default_range(day("2025-04-07"));
    assert_eq!(request.start, day("2025-03-08"));
    assert_eq!(
        request.file_name(),
        "attendance_report_2025-03-08_to_2025-04-07.csv"
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(request.file_name());
    let rows = generate_report(&store, &request).unwrap();
    write_report_file(&path, &rows).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text.lines().count(), 6);
}
