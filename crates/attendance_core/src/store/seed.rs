//! Demo data loaded by [`AttendanceStore::seeded`](super::AttendanceStore::seeded).

use crate::model::class_info::ClassInfo;
use crate::model::record::{AttendanceRecord, AttendanceStatus};
use crate::model::student::Student;
use chrono::NaiveDate;

pub(super) struct SeedData {
    pub students: Vec<Student>,
    pub classes: Vec<ClassInfo>,
    pub records: Vec<AttendanceRecord>,
}

fn april_2025(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 4, day).expect("valid seed date")
}

pub(super) fn demo_data() -> SeedData {
    use AttendanceStatus::{Absent, Late, Present};

    let students = vec![
        Student::with_id("1", "John Doe", "john.doe@example.com", "Mathematics 101"),
        Student::with_id("2", "Jane Smith", "jane.smith@example.com", "Mathematics 101"),
        Student::with_id("3", "Michael Johnson", "michael.j@example.com", "Physics 202"),
        Student::with_id("4", "Emily Davis", "emily.d@example.com", "Physics 202"),
        Student::with_id("5", "Robert Wilson", "robert.w@example.com", "Chemistry 303"),
    ];

    let classes = vec![
        ClassInfo::with_id("101", "Mathematics 101", 2),
        ClassInfo::with_id("202", "Physics 202", 2),
        ClassInfo::with_id("303", "Chemistry 303", 1),
    ];

    let records = vec![
        AttendanceRecord::with_id("a1", "1", april_2025(7), Present),
        AttendanceRecord::with_id("a2", "2", april_2025(7), Absent).with_notes("Sick"),
        AttendanceRecord::with_id("a3", "3", april_2025(7), Late).with_notes("Traffic"),
        AttendanceRecord::with_id("a4", "4", april_2025(7), Present),
        AttendanceRecord::with_id("a5", "5", april_2025(7), Present),
        AttendanceRecord::with_id("a6", "1", april_2025(6), Present),
        AttendanceRecord::with_id("a7", "2", april_2025(6), Present),
        AttendanceRecord::with_id("a8", "3", april_2025(6), Absent)
            .with_notes("Doctor appointment"),
        AttendanceRecord::with_id("a9", "4", april_2025(6), Present),
        AttendanceRecord::with_id("a10", "5", april_2025(6), Late).with_notes("Bus delay"),
    ];

    SeedData {
        students,
        classes,
        records,
    }
}
