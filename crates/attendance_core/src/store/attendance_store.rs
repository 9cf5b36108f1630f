//! Attendance store implementation.
//!
//! # Responsibility
//! - Provide query and mutation APIs over the three in-memory collections.
//! - Maintain class roster counts through a single recount path.
//!
//! # Invariants
//! - Student ids are unique; duplicates are skipped on insert.
//! - Record writes upsert by `(student_id, date)` and keep slot order.
//! - A `user_id` is linked to at most one student at a time.

use super::seed;
use crate::model::class_info::ClassInfo;
use crate::model::record::{AttendanceRecord, AttendanceStatus, RecordKey};
use crate::model::student::{Student, StudentId};
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::{HashMap, HashSet};

/// Students of one class together with their attendance records.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassAttendance {
    pub records: Vec<AttendanceRecord>,
    pub students: Vec<Student>,
}

/// Owner of all attendance state for one session.
///
/// Consumers read through borrowed snapshots and write only through
/// `&mut self` operations.
#[derive(Debug, Clone, Default)]
pub struct AttendanceStore {
    students: Vec<Student>,
    classes: Vec<ClassInfo>,
    records: Vec<AttendanceRecord>,
}

impl AttendanceStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with the demo roster and two days of marks.
    pub fn seeded() -> Self {
        let seed = seed::demo_data();
        Self::from_parts(seed.students, seed.classes, seed.records)
    }

    /// Builds a store from raw collections, applying the same duplicate,
    /// recount and upsert rules as incremental writes.
    pub fn from_parts(
        students: Vec<Student>,
        classes: Vec<ClassInfo>,
        records: Vec<AttendanceRecord>,
    ) -> Self {
        let mut store = Self {
            classes,
            ..Self::default()
        };
        store.add_students(students);
        store.add_attendance_records(records);
        store
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn classes(&self) -> &[ClassInfo] {
        &self.classes
    }

    pub fn records(&self) -> &[AttendanceRecord] {
        &self.records
    }

    pub fn find_student(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|student| student.id == student_id)
    }

    pub fn find_class(&self, class_name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|class| class.name == class_name)
    }

    /// Returns the record stored under the composite key, if any.
    pub fn find_record(&self, student_id: &str, date: NaiveDate) -> Option<&AttendanceRecord> {
        self.records
            .iter()
            .find(|record| record.student_id == student_id && record.date == date)
    }

    /// Appends students and refreshes class roster counts.
    ///
    /// Students whose id already exists (in the store or earlier in the same
    /// batch) are skipped. Returns the number of students appended.
    pub fn add_students(&mut self, new_students: Vec<Student>) -> usize {
        let mut known: HashSet<StudentId> = self
            .students
            .iter()
            .map(|student| student.id.clone())
            .collect();
        let mut appended = 0usize;
        let mut skipped = 0usize;

        for student in new_students {
            if !known.insert(student.id.clone()) {
                warn!(
                    "event=student_add module=store status=skip reason=duplicate_id student_id={}",
                    student.id
                );
                skipped += 1;
                continue;
            }
            self.students.push(student);
            appended += 1;
        }

        self.recount_classes();
        info!(
            "event=student_add module=store status=ok appended={} skipped={} total={}",
            appended,
            skipped,
            self.students.len()
        );
        appended
    }

    /// Upserts records by `(student_id, date)`.
    ///
    /// A replaced record keeps its position in the collection; new keys are
    /// appended. Later entries in `records` win over earlier ones.
    pub fn add_attendance_records(&mut self, records: Vec<AttendanceRecord>) {
        let mut slots: HashMap<RecordKey, usize> = self
            .records
            .iter()
            .enumerate()
            .map(|(slot, record)| (record.key(), slot))
            .collect();
        let mut inserted = 0usize;
        let mut replaced = 0usize;

        for record in records {
            let key = record.key();
            match slots.get(&key) {
                Some(&slot) => {
                    debug!(
                        "event=record_upsert module=store status=replace key={} previous_id={} id={}",
                        key, self.records[slot].id, record.id
                    );
                    self.records[slot] = record;
                    replaced += 1;
                }
                None => {
                    slots.insert(key, self.records.len());
                    self.records.push(record);
                    inserted += 1;
                }
            }
        }

        info!(
            "event=record_upsert module=store status=ok inserted={} replaced={} total={}",
            inserted,
            replaced,
            self.records.len()
        );
    }

    /// Replaces `status` and `notes` of the record with `id`.
    ///
    /// `notes = None` clears existing notes. Unknown ids leave the collection
    /// untouched. Returns whether a record was updated.
    pub fn update_attendance_record(
        &mut self,
        id: &str,
        status: AttendanceStatus,
        notes: Option<String>,
    ) -> bool {
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            debug!(
                "event=record_update module=store status=skip reason=not_found record_id={}",
                id
            );
            return false;
        };

        record.status = status;
        record.notes = notes;
        info!(
            "event=record_update module=store status=ok record_id={} attendance={}",
            id, status
        );
        true
    }

    /// Returns every record of one student in collection order.
    pub fn get_student_attendance(&self, student_id: &str) -> Vec<AttendanceRecord> {
        self.records
            .iter()
            .filter(|record| record.student_id == student_id)
            .cloned()
            .collect()
    }

    /// Resolves a class roster by name and the records of its students.
    pub fn get_class_attendance(&self, class_name: &str) -> ClassAttendance {
        let students: Vec<Student> = self
            .students
            .iter()
            .filter(|student| student.is_in_class(class_name))
            .cloned()
            .collect();
        let ids: HashSet<&str> = students.iter().map(|student| student.id.as_str()).collect();
        let records = self
            .records
            .iter()
            .filter(|record| ids.contains(record.student_id.as_str()))
            .cloned()
            .collect();

        ClassAttendance { records, students }
    }

    pub fn get_attendance_by_date(&self, date: NaiveDate) -> Vec<AttendanceRecord> {
        self.records
            .iter()
            .filter(|record| record.date == date)
            .cloned()
            .collect()
    }

    /// Students marked absent on `date`.
    ///
    /// Records whose `student_id` does not resolve to a student are dropped.
    pub fn get_absentees(&self, date: NaiveDate) -> Vec<Student> {
        self.records
            .iter()
            .filter(|record| record.date == date && record.status == AttendanceStatus::Absent)
            .filter_map(|record| self.find_student(&record.student_id))
            .cloned()
            .collect()
    }

    /// Links `user_id` to the student with `student_id`.
    ///
    /// Any other student holding the same `user_id` is unlinked first so the
    /// identity keeps resolving to a single student. Returns `false` when the
    /// student does not exist.
    pub fn link_student_to_user(&mut self, student_id: &str, user_id: impl Into<String>) -> bool {
        let user_id = user_id.into();
        if self.find_student(student_id).is_none() {
            debug!(
                "event=user_link module=store status=skip reason=student_not_found student_id={}",
                student_id
            );
            return false;
        }

        for other in self
            .students
            .iter_mut()
            .filter(|s| s.id != student_id && s.user_id.as_deref() == Some(user_id.as_str()))
        {
            warn!(
                "event=user_link module=store status=relink previous_student_id={} student_id={}",
                other.id, student_id
            );
            other.user_id = None;
        }

        if let Some(student) = self.students.iter_mut().find(|s| s.id == student_id) {
            student.user_id = Some(user_id);
        }
        info!(
            "event=user_link module=store status=ok student_id={}",
            student_id
        );
        true
    }

    pub fn get_student_by_user_id(&self, user_id: &str) -> Option<&Student> {
        self.students
            .iter()
            .find(|student| student.user_id.as_deref() == Some(user_id))
    }

    fn recount_classes(&mut self) {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();
        for student in &self.students {
            let name = student.class_name.as_str();
            let count = counts.entry(name).or_insert_with(|| {
                first_seen.push(name);
                0
            });
            *count += 1;
        }

        for class in &mut self.classes {
            class.student_count = counts.get(class.name.as_str()).copied().unwrap_or(0);
        }

        let missing: Vec<(String, usize)> = first_seen
            .into_iter()
            .filter(|name| !self.classes.iter().any(|class| class.name == *name))
            .map(|name| (name.to_string(), counts.get(name).copied().unwrap_or(0)))
            .collect();

        for (name, student_count) in missing {
            let mut class = ClassInfo::new(name);
            class.student_count = student_count;
            info!(
                "event=class_create module=store status=ok class_id={} student_count={}",
                class.id, class.student_count
            );
            self.classes.push(class);
        }
    }
}
