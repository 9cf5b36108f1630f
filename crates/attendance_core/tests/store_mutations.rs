use attendance_core::{parse_iso_date, AttendanceRecord, AttendanceStatus, AttendanceStore, Student};
use std::collections::HashSet;

fn day(value: &str) -> chrono::NaiveDate {
    parse_iso_date(value).unwrap()
}

#[test]
fn upsert_twice_with_same_batch_is_idempotent() {
    let mut store = AttendanceStore::seeded();
    let batch = vec![
        AttendanceRecord::with_id("n1", "1", day("2025-04-08"), AttendanceStatus::Present),
        AttendanceRecord::with_id("n2", "2", day("2025-04-08"), AttendanceStatus::Late),
    ];

    store.add_attendance_records(batch.clone());
    let once = store.records().to_vec();
    store.add_attendance_records(batch);

    assert_eq!(store.records(), once.as_slice());
    let keys: HashSet<_> = store.records().iter().map(|r| r.key()).collect();
    assert_eq!(keys.len(), store.records().len());
}

#[test]
fn later_write_for_same_student_and_date_wins() {
    let mut store = AttendanceStore::seeded();
    let date = day("2025-04-07");
    assert_eq!(
        store.find_record("1", date).unwrap().status,
        AttendanceStatus::Present
    );

    store.add_attendance_records(vec![AttendanceRecord::with_id(
        "override",
        "1",
        date,
        AttendanceStatus::Absent,
    )]);

    let matching: Vec<_> = store
        .records()
        .iter()
        .filter(|r| r.student_id == "1" && r.date == date)
        .collect();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].status, AttendanceStatus::Absent);
    assert_eq!(matching[0].id, "override");
    assert_eq!(store.records().len(), 10);
    // Replaced record keeps its slot.
    assert_eq!(store.records()[0].id, "override");
}

#[test]
fn later_entry_in_same_batch_wins() {
    let mut store = AttendanceStore::new();
    let date = day("2025-05-01");
    store.add_attendance_records(vec![
        AttendanceRecord::with_id("r1", "s1", date, AttendanceStatus::Present),
        AttendanceRecord::with_id("r2", "s1", date, AttendanceStatus::Late),
    ]);

    assert_eq!(store.records().len(), 1);
    assert_eq!(store.records()[0].id, "r2");
    assert_eq!(store.records()[0].status, AttendanceStatus::Late);
}

#[test]
fn adding_students_keeps_class_counts_in_lockstep() {
    let mut store = AttendanceStore::seeded();
    assert_eq!(store.find_class("Physics 202").unwrap().student_count, 2);

    let added = store.add_students(vec![
        Student::with_id("p1", "Ada", "ada@example.com", "Physics 202"),
        Student::with_id("p2", "Max", "max@example.com", "Physics 202"),
        Student::with_id("p3", "Kim", "kim@example.com", "Physics 202"),
    ]);
    assert_eq!(added, 3);

    let physics = store.find_class("Physics 202").unwrap();
    assert_eq!(physics.student_count, 5);
    assert_eq!(physics.id, "202");
    assert_eq!(store.find_class("Mathematics 101").unwrap().student_count, 2);
}

#[test]
fn unseen_class_name_creates_class_with_one_student() {
    let mut store = AttendanceStore::seeded();
    store.add_students(vec![Student::with_id(
        "h1",
        "Lea",
        "lea@example.com",
        "History 505",
    )]);

    assert_eq!(store.classes().len(), 4);
    let history = store.find_class("History 505").unwrap();
    assert_eq!(history.student_count, 1);
    assert!(!history.id.is_empty());
}

#[test]
fn duplicate_student_ids_are_skipped() {
    let mut store = AttendanceStore::seeded();
    let added = store.add_students(vec![
        Student::with_id("1", "Impostor", "x@example.com", "Physics 202"),
        Student::with_id("n1", "New", "new@example.com", "Physics 202"),
        Student::with_id("n1", "Repeat", "rep@example.com", "Physics 202"),
    ]);

    assert_eq!(added, 1);
    assert_eq!(store.students().len(), 6);
    assert_eq!(store.find_student("1").unwrap().name, "John Doe");
    assert_eq!(store.find_student("n1").unwrap().name, "New");
    assert_eq!(store.find_class("Physics 202").unwrap().student_count, 3);
}

#[test]
fn empty_student_batch_changes_nothing() {
    let mut store = AttendanceStore::seeded();
    let classes_before = store.classes().to_vec();
    assert_eq!(store.add_students(Vec::new()), 0);
    assert_eq!(store.classes(), classes_before.as_slice());
}

#[test]
fn update_replaces_status_and_notes() {
    let mut store = AttendanceStore::seeded();

    assert!(store.update_attendance_record("a2", AttendanceStatus::Late, None));
    let record = store.records().iter().find(|r| r.id == "a2").unwrap();
    assert_eq!(record.status, AttendanceStatus::Late);
    assert_eq!(record.notes, None);

    assert!(store.update_attendance_record(
        "a1",
        AttendanceStatus::Absent,
        Some("Flu".to_string())
    ));
    let record = store.records().iter().find(|r| r.id == "a1").unwrap();
    assert_eq!(record.notes.as_deref(), Some("Flu"));
}

#[test]
fn update_with_unknown_id_is_a_no_op() {
    let mut store = AttendanceStore::seeded();
    let before = store.records().to_vec();

    assert!(!store.update_attendance_record("nonexistent", AttendanceStatus::Late, None));
    assert_eq!(store.records(), before.as_slice());
}

#[test]
fn linked_user_resolves_back_to_student() {
    let mut store = AttendanceStore::seeded();
    assert!(store.link_student_to_user("3", "user-42"));

    let student = store.get_student_by_user_id("user-42").unwrap();
    assert_eq!(student.id, "3");
    assert!(store.get_student_by_user_id("user-43").is_none());
}

#[test]
fn relinking_a_user_moves_it_to_the_new_student() {
    let mut store = AttendanceStore::seeded();
    store.link_student_to_user("1", "user-7");
    store.link_student_to_user("2", "user-7");

    assert_eq!(store.get_student_by_user_id("user-7").unwrap().id, "2");
    assert_eq!(store.find_student("1").unwrap().user_id, None);
    let holders = store
        .students()
        .iter()
        .filter(|s| s.user_id.as_deref() == Some("user-7"))
        .count();
    assert_eq!(holders, 1);
}

#[test]
fn linking_unknown_student_does_nothing() {
    let mut store = AttendanceStore::seeded();
    assert!(!store.link_student_to_user("missing", "user-1"));
    assert!(store.get_student_by_user_id("user-1").is_none());
}
