//! Class metadata.

use super::generate_id;
use serde::{Deserialize, Serialize};

pub type ClassId = String;

/// A class and its cached roster size.
///
/// `student_count` is a denormalized cache owned by the store; it is
/// recomputed from the student collection after every student addition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassInfo {
    pub id: ClassId,
    /// Natural key used by students and reports.
    pub name: String,
    pub student_count: usize,
}

impl ClassInfo {
    /// Creates an empty class with a generated `class-<uuid>` id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(generate_id("class"), name, 0)
    }

    pub fn with_id(id: impl Into<ClassId>, name: impl Into<String>, student_count: usize) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            student_count,
        }
    }
}
