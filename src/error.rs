//! Error types for grading, ingestion and configuration.
//!
//! An empty cohort or a missing student is not an error; see
//! [`crate::models::Lookup`].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GradeError {
    #[error("invalid subject: {0}")]
    InvalidSubject(String),

    #[error("invalid cohort year: {0}")]
    InvalidYear(u8),
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("duplicate student ID: {0}")]
    DuplicateId(String),

    #[error("invalid {subject} score for student {id}")]
    InvalidScore { id: String, subject: String },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("grade quota must be non-negative and sum to 1.0, got {0:?}")]
    InvalidQuota([f64; 5]),

    #[error("at least one cohort year must be configured")]
    EmptyYears,

    #[error("at least one subject must be configured")]
    EmptySubjects,

    #[error(transparent)]
    InvalidSubject(#[from] GradeError),
}
