//! Quota-based grading and ranking over a student score roster.
//!
//! [`cohort::CohortGrader`] builds per-year subject and overall standings;
//! [`projector::StudentProjector`] answers single-student lookups on top of it.

pub mod cohort;
pub mod config;
pub mod error;
pub mod grading;
pub mod loader;
pub mod models;
pub mod projector;
pub mod rank;
pub mod report;
pub mod stats;
