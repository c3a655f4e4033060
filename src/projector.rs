//! Point lookups joining one student's subject and overall standings.

use std::collections::HashMap;

use crate::cohort::CohortGrader;
use crate::error::GradeError;
use crate::models::{
    Lookup, OverallStanding, ScoreTable, StudentProfile, StudentStanding, Subject, SubjectResult,
};

pub struct StudentProjector<'a> {
    grader: CohortGrader<'a>,
}

impl<'a> StudentProjector<'a> {
    pub fn new(grader: CohortGrader<'a>) -> Self {
        Self { grader }
    }

    /// One student's subject score, subject rank/grade and overall
    /// rank/grade within `year`.
    pub fn project(
        &self,
        table: &ScoreTable,
        year: u8,
        subject: Subject,
        student_id: &str,
    ) -> Result<Lookup<StudentStanding>, GradeError> {
        let standings = self.grader.grade(table, year, subject)?;
        if standings.is_empty() {
            return Ok(Lookup::EmptyCohort);
        }
        let Some(standing) = standings.into_iter().find(|s| s.student_id == student_id) else {
            return Ok(Lookup::StudentNotFound);
        };

        let overall = self.grader.grade_overall(table, year)?;
        let (Some(record), Some(total)) = (
            table.find(student_id),
            overall.iter().find(|o| o.student_id == student_id),
        ) else {
            return Ok(Lookup::StudentNotFound);
        };

        Ok(Lookup::Found(StudentStanding {
            student_id: standing.student_id,
            cohort_year: record.cohort_year,
            section: record.section.clone(),
            subject,
            score: standing.score,
            subject_rank: standing.subject_rank,
            subject_grade: standing.subject_grade,
            overall_rank: total.overall_rank,
            overall_grade: total.overall_grade,
        }))
    }

    /// Every configured subject plus total/average for a student, graded
    /// within the student's own cohort.
    pub fn profile(
        &self,
        table: &ScoreTable,
        student_id: &str,
    ) -> Result<Lookup<StudentProfile>, GradeError> {
        let Some(record) = table.find(student_id) else {
            return Ok(Lookup::StudentNotFound);
        };
        let year = record.cohort_year;

        let mut subjects = Vec::with_capacity(self.grader.config().subjects.len());
        for subject in &self.grader.config().subjects {
            let standing = self
                .grader
                .grade(table, year, *subject)?
                .into_iter()
                .find(|s| s.student_id == student_id);
            let Some(standing) = standing else {
                return Ok(Lookup::StudentNotFound);
            };
            subjects.push(SubjectResult {
                subject: *subject,
                score: standing.score,
                rank: standing.subject_rank,
                grade: standing.subject_grade,
            });
        }

        let overall = self.grader.grade_overall(table, year)?;
        let Some(total) = overall.into_iter().find(|o| o.student_id == student_id) else {
            return Ok(Lookup::StudentNotFound);
        };

        Ok(Lookup::Found(StudentProfile {
            student_id: record.id.clone(),
            cohort_year: year,
            section: record.section.clone(),
            subjects,
            total_score: total.total_score,
            average_score: total.average_score,
            overall_rank: total.overall_rank,
            overall_grade: total.overall_grade,
        }))
    }

    /// The top `limit` students of `year` by `subject` rank, each joined with
    /// their overall standing.
    pub fn leaderboard(
        &self,
        table: &ScoreTable,
        year: u8,
        subject: Subject,
        limit: usize,
    ) -> Result<Vec<StudentStanding>, GradeError> {
        let standings = self.grader.grade(table, year, subject)?;
        let overall: HashMap<String, OverallStanding> = self
            .grader
            .grade_overall(table, year)?
            .into_iter()
            .map(|o| (o.student_id.clone(), o))
            .collect();

        Ok(standings
            .into_iter()
            .take(limit)
            .filter_map(|standing| {
                let record = table.find(&standing.student_id)?;
                let total = overall.get(&standing.student_id)?;
                Some(StudentStanding {
                    cohort_year: record.cohort_year,
                    section: record.section.clone(),
                    subject,
                    score: standing.score,
                    subject_rank: standing.subject_rank,
                    subject_grade: standing.subject_grade,
                    overall_rank: total.overall_rank,
                    overall_grade: total.overall_grade,
                    student_id: standing.student_id,
                })
            })
            .collect())
    }
}
