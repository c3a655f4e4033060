use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{GradeError, LoadError};

/// The closed set of graded subjects.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Subject {
    Math,
    English,
    Science,
}

impl Subject {
    pub const ALL: [Subject; 3] = [Subject::Math, Subject::English, Subject::Science];

    pub fn name(self) -> &'static str {
        match self {
            Subject::Math => "math",
            Subject::English => "english",
            Subject::Science => "science",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subject {
    type Err = GradeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "math" | "수학" => Ok(Subject::Math),
            "english" | "영어" => Ok(Subject::English),
            "science" | "과학" => Ok(Subject::Science),
            _ => Err(GradeError::InvalidSubject(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SubjectScores {
    pub math: f64,
    pub english: f64,
    pub science: f64,
}

impl SubjectScores {
    pub fn get(&self, subject: Subject) -> f64 {
        match subject {
            Subject::Math => self.math,
            Subject::English => self.english,
            Subject::Science => self.science,
        }
    }

    pub fn total(&self) -> f64 {
        Subject::ALL.iter().map(|subject| self.get(*subject)).sum()
    }

    pub fn average(&self) -> f64 {
        self.total() / Subject::ALL.len() as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub id: String,
    pub cohort_year: u8,
    pub section: String,
    pub scores: SubjectScores,
    pub attendance_rate: Option<f64>,
    pub gender: Option<String>,
}

impl StudentRecord {
    pub fn score(&self, subject: Subject) -> f64 {
        self.scores.get(subject)
    }
}

/// Read-only roster of students. Grading never writes back into it.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    records: Vec<StudentRecord>,
}

impl ScoreTable {
    pub fn new(records: Vec<StudentRecord>) -> Result<Self, LoadError> {
        let mut seen = HashSet::new();
        for record in &records {
            if !seen.insert(record.id.as_str()) {
                return Err(LoadError::DuplicateId(record.id.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn cohort(&self, year: u8) -> impl Iterator<Item = &StudentRecord> {
        self.records
            .iter()
            .filter(move |record| record.cohort_year == year)
    }

    pub fn find(&self, student_id: &str) -> Option<&StudentRecord> {
        self.records.iter().find(|record| record.id == student_id)
    }

    /// Distinct cohort years present in the table, ascending.
    pub fn years(&self) -> Vec<u8> {
        let mut years: Vec<u8> = self.records.iter().map(|r| r.cohort_year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    pub fn has_attendance(&self) -> bool {
        self.records.iter().any(|r| r.attendance_rate.is_some())
    }

    pub fn has_gender(&self) -> bool {
        self.records.iter().any(|r| r.gender.is_some())
    }
}

/// A student record annotated with whole-table total, average, rank and grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedRow {
    #[serde(flatten)]
    pub record: StudentRecord,
    pub total_score: f64,
    pub average_score: f64,
    pub rank: u32,
    pub grade: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectStanding {
    pub student_id: String,
    pub score: f64,
    pub subject_rank: u32,
    pub subject_grade: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallStanding {
    pub student_id: String,
    pub total_score: f64,
    pub average_score: f64,
    pub overall_rank: u32,
    pub overall_grade: u8,
}

/// One student's subject result joined with their overall result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentStanding {
    pub student_id: String,
    pub cohort_year: u8,
    pub section: String,
    pub subject: Subject,
    pub score: f64,
    pub subject_rank: u32,
    pub subject_grade: u8,
    pub overall_rank: u32,
    pub overall_grade: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectResult {
    pub subject: Subject,
    pub score: f64,
    pub rank: u32,
    pub grade: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentProfile {
    pub student_id: String,
    pub cohort_year: u8,
    pub section: String,
    pub subjects: Vec<SubjectResult>,
    pub total_score: f64,
    pub average_score: f64,
    pub overall_rank: u32,
    pub overall_grade: u8,
}

/// Outcome of a point lookup. An empty cohort and a missing student are
/// distinct, displayable outcomes rather than errors.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    EmptyCohort,
    StudentNotFound,
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn student(id: &str, year: u8, math: f64, english: f64, science: f64) -> StudentRecord {
        StudentRecord {
            id: id.to_string(),
            cohort_year: year,
            section: "A".to_string(),
            scores: SubjectScores {
                math,
                english,
                science,
            },
            attendance_rate: None,
            gender: None,
        }
    }

    pub fn table(records: Vec<StudentRecord>) -> ScoreTable {
        ScoreTable::new(records).expect("unique ids")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn subject_parses_english_and_korean_names() {
        assert_eq!("Math".parse::<Subject>().unwrap(), Subject::Math);
        assert_eq!("영어".parse::<Subject>().unwrap(), Subject::English);
        assert_eq!(" science ".parse::<Subject>().unwrap(), Subject::Science);
    }

    #[test]
    fn unknown_subject_is_rejected() {
        let err = "history".parse::<Subject>().unwrap_err();
        assert!(matches!(err, GradeError::InvalidSubject(name) if name == "history"));
    }

    #[test]
    fn totals_and_averages_cover_every_subject() {
        let record = student("S1", 1, 90.0, 80.0, 70.0);
        assert_eq!(record.scores.total(), 240.0);
        assert_eq!(record.scores.average(), 80.0);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = ScoreTable::new(vec![
            student("S1", 1, 1.0, 1.0, 1.0),
            student("S1", 2, 2.0, 2.0, 2.0),
        ])
        .unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId(id) if id == "S1"));
    }

    #[test]
    fn cohort_filter_and_years() {
        let table = table(vec![
            student("S1", 2, 1.0, 1.0, 1.0),
            student("S2", 1, 2.0, 2.0, 2.0),
            student("S3", 2, 3.0, 3.0, 3.0),
        ]);
        assert_eq!(table.cohort(2).count(), 2);
        assert_eq!(table.cohort(3).count(), 0);
        assert_eq!(table.years(), vec![1, 2]);
        assert_eq!(table.find("S2").map(|r| r.cohort_year), Some(1));
        assert!(table.find("S9").is_none());
    }
}
