//! Student domain model.
//!
//! # Invariants
//! - `id` is stable and never reassigned after creation.
//! - `class_name` is a free-text label matched against `ClassInfo::name`.
//! - `user_id` should resolve back to at most one student.

use super::generate_id;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable student identifier. Seeded students use short ids (`"1"`).
pub type StudentId = String;

/// One enrolled student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
    /// Serialized as `class` to match external schema naming.
    #[serde(rename = "class")]
    pub class_name: String,
    /// Opaque login identity linked to this student, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Field-level validation failures for student input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    EmptyId,
    EmptyName,
    EmptyEmail,
    EmptyClass,
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "student id cannot be empty"),
            Self::EmptyName => write!(f, "student name cannot be empty"),
            Self::EmptyEmail => write!(f, "student email cannot be empty"),
            Self::EmptyClass => write!(f, "student class cannot be empty"),
        }
    }
}

impl Error for StudentValidationError {}

impl Student {
    /// Creates a student with a generated `student-<uuid>` id.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self::with_id(generate_id("student"), name, email, class_name)
    }

    /// Creates a student with a caller-provided id.
    ///
    /// Used by seed and import paths where identity already exists.
    pub fn with_id(
        id: impl Into<StudentId>,
        name: impl Into<String>,
        email: impl Into<String>,
        class_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            class_name: class_name.into(),
            user_id: None,
        }
    }

    /// Returns whether this student belongs to `class_name` (exact match).
    pub fn is_in_class(&self, class_name: &str) -> bool {
        self.class_name == class_name
    }

    /// Checks that every required text field is non-blank.
    ///
    /// The store itself never calls this; callers that accept user input
    /// (forms, services) validate before handing students over.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.id.trim().is_empty() {
            return Err(StudentValidationError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        if self.email.trim().is_empty() {
            return Err(StudentValidationError::EmptyEmail);
        }
        if self.class_name.trim().is_empty() {
            return Err(StudentValidationError::EmptyClass);
        }
        Ok(())
    }
}
