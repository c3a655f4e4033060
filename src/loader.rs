use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::LoadError;
use crate::models::{ScoreTable, StudentRecord, Subject, SubjectScores};

/// Accepted header names per column, English first.
const REQUIRED_COLUMNS: [(&str, &[&str]); 6] = [
    ("id", &["id", "student_id", "학생ID"]),
    ("year", &["year", "cohort_year", "학년"]),
    ("section", &["section", "class", "반"]),
    ("math", &["math", "수학"]),
    ("english", &["english", "영어"]),
    ("science", &["science", "과학"]),
];

#[derive(Deserialize)]
struct CsvRow {
    #[serde(alias = "student_id", alias = "학생ID")]
    id: String,
    #[serde(alias = "cohort_year", alias = "학년")]
    year: u8,
    #[serde(alias = "class", alias = "반")]
    section: String,
    #[serde(alias = "수학")]
    math: f64,
    #[serde(alias = "영어")]
    english: f64,
    #[serde(alias = "과학")]
    science: f64,
    #[serde(default, alias = "attendance_rate", alias = "출석률(%)")]
    attendance: Option<f64>,
    #[serde(default, alias = "성별")]
    gender: Option<String>,
}

pub fn load_csv(path: &Path) -> Result<ScoreTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let table = read_csv(file)?;
    debug!(path = %path.display(), rows = table.len(), "loaded score table");
    Ok(table)
}

pub fn read_csv<R: Read>(input: R) -> Result<ScoreTable, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);

    let headers = reader.headers()?.clone();
    for (column, aliases) in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| aliases.contains(&header)) {
            return Err(LoadError::MissingColumn(column.to_string()));
        }
    }

    let mut records = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let scores = SubjectScores {
            math: row.math,
            english: row.english,
            science: row.science,
        };
        for subject in Subject::ALL {
            if !scores.get(subject).is_finite() {
                return Err(LoadError::InvalidScore {
                    id: row.id,
                    subject: subject.to_string(),
                });
            }
        }

        records.push(StudentRecord {
            id: row.id,
            cohort_year: row.year,
            section: row.section,
            scores,
            attendance_rate: row.attendance,
            gender: row.gender.filter(|g| !g.is_empty()),
        });
    }

    ScoreTable::new(records)
}
