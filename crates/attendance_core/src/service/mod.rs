//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store calls into staff- and student-facing use-cases.
//! - Keep input validation out of the store, at the caller boundary.

pub mod attendance_service;
