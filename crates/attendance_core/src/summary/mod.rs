//! Attendance aggregation.
//!
//! # Responsibility
//! - Reduce record lists into counts and percentages.
//! - Derive per-class, per-weekday and recency views for dashboards.
//!
//! # Invariants
//! - All functions are pure over their inputs and never touch the store's
//!   collections mutably.
//! - Percentages are `0.0` for empty inputs.

pub mod aggregate;
pub mod analytics;
