use tracing::debug;

use crate::config::GradingConfig;
use crate::error::GradeError;
use crate::grading::assign_grades;
use crate::models::{DerivedRow, OverallStanding, ScoreTable, StudentRecord, Subject, SubjectStanding};
use crate::rank::{min_ranks, sort_descending};

/// Builds subject-level and overall-level rankings for one cohort year.
///
/// Every call filters, sorts and grades its own working copy. Subject and
/// overall views come from separate sorts and are only joined by student id.
#[derive(Debug, Clone, Copy)]
pub struct CohortGrader<'a> {
    config: &'a GradingConfig,
}

impl<'a> CohortGrader<'a> {
    pub fn new(config: &'a GradingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a GradingConfig {
        self.config
    }

    /// Subject standings for `year`, best first. An empty cohort yields an
    /// empty vector.
    pub fn grade(
        &self,
        table: &ScoreTable,
        year: u8,
        subject: Subject,
    ) -> Result<Vec<SubjectStanding>, GradeError> {
        self.config.check_year(year)?;
        self.config.check_subject(subject)?;

        let mut cohort: Vec<&StudentRecord> = table.cohort(year).collect();
        sort_descending(&mut cohort, |record| record.score(subject));
        let scores: Vec<f64> = cohort.iter().map(|record| record.score(subject)).collect();
        let ranks = min_ranks(&scores);
        let grades = assign_grades(&scores, &self.config.quota);

        debug!(year, %subject, rows = cohort.len(), "graded subject cohort");

        Ok(cohort
            .into_iter()
            .zip(scores)
            .zip(ranks.into_iter().zip(grades))
            .map(|((record, score), (subject_rank, subject_grade))| SubjectStanding {
                student_id: record.id.clone(),
                score,
                subject_rank,
                subject_grade,
            })
            .collect())
    }

    /// Total-score standings for `year`, best first.
    pub fn grade_overall(
        &self,
        table: &ScoreTable,
        year: u8,
    ) -> Result<Vec<OverallStanding>, GradeError> {
        self.config.check_year(year)?;

        let rows = self.derive(table.cohort(year));
        debug!(year, rows = rows.len(), "graded overall cohort");

        Ok(rows
            .into_iter()
            .map(|row| OverallStanding {
                student_id: row.record.id,
                total_score: row.total_score,
                average_score: row.average_score,
                overall_rank: row.rank,
                overall_grade: row.grade,
            })
            .collect())
    }

    /// Whole-table total/average/rank/grade, ignoring cohort years.
    pub fn grade_all(&self, table: &ScoreTable) -> Vec<DerivedRow> {
        let rows = self.derive(table.records().iter());
        debug!(rows = rows.len(), "graded whole table");
        rows
    }

    fn derive<'t>(&self, records: impl Iterator<Item = &'t StudentRecord>) -> Vec<DerivedRow> {
        let mut records: Vec<&StudentRecord> = records.collect();
        sort_descending(&mut records, |record| record.scores.total());
        let totals: Vec<f64> = records.iter().map(|record| record.scores.total()).collect();
        let ranks = min_ranks(&totals);
        let grades = assign_grades(&totals, &self.config.quota);

        records
            .into_iter()
            .zip(ranks.into_iter().zip(grades))
            .map(|(record, (rank, grade))| DerivedRow {
                record: record.clone(),
                total_score: record.scores.total(),
                average_score: record.scores.average(),
                rank,
                grade,
            })
            .collect()
    }
}
