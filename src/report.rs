use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{StudentProfile, StudentStanding, Subject};
use crate::stats::{Describe, Extremes, GroupMeans};

pub struct Summary<'a> {
    pub subjects: &'a [Subject],
    pub describe: &'a [(Subject, Describe)],
    pub by_year: &'a [GroupMeans<u8>],
    pub by_gender: &'a [GroupMeans<String>],
    pub attendance: &'a [(u8, Describe)],
    pub top: &'a Extremes,
    pub bottom: &'a Extremes,
}

fn subject_header(output: &mut String, label: &str, subjects: &[Subject]) {
    let _ = write!(output, "| {label} | n |");
    for subject in subjects {
        let _ = write!(output, " {subject} |");
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "|{}", "---|".repeat(subjects.len() + 2));
}

fn group_table<K: std::fmt::Display>(
    output: &mut String,
    label: &str,
    subjects: &[Subject],
    groups: &[GroupMeans<K>],
) {
    subject_header(output, label, subjects);
    for group in groups {
        let _ = write!(output, "| {} | {} |", group.key, group.count);
        for (_, mean) in &group.means {
            let _ = write!(output, " {mean:.1} |");
        }
        let _ = writeln!(output);
    }
}

fn extremes_section(output: &mut String, title: &str, extremes: &Extremes) {
    let _ = writeln!(output);
    let _ = writeln!(output, "## {title}");

    if extremes.rows.is_empty() {
        let _ = writeln!(output, "No students recorded.");
        return;
    }

    for row in &extremes.rows {
        let _ = writeln!(
            output,
            "- {} (year {}, section {}) total {:.1}, average {:.1}",
            row.record.id, row.record.cohort_year, row.record.section, row.total_score, row.average_score
        );
    }
    let _ = writeln!(
        output,
        "Mean total {:.1}, mean average {:.1}",
        extremes.mean_total, extremes.mean_average
    );
}

pub fn build_summary(generated_on: NaiveDate, summary: &Summary<'_>) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Score Summary");
    let _ = writeln!(output, "Generated on {generated_on}");
    let _ = writeln!(output);
    let _ = writeln!(output, "## Descriptive Statistics");

    if summary.describe.is_empty() {
        let _ = writeln!(output, "No scores recorded.");
    } else {
        let _ = writeln!(output, "| subject | n | mean | std | min | max | median |");
        let _ = writeln!(output, "|---|---|---|---|---|---|---|");
        for (subject, d) in summary.describe {
            let _ = writeln!(
                output,
                "| {} | {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} |",
                subject, d.count, d.mean, d.std_dev, d.min, d.max, d.median
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Subject Means by Year");
    group_table(&mut output, "year", summary.subjects, summary.by_year);

    let _ = writeln!(output);
    let _ = writeln!(output, "## Subject Means by Gender");
    if summary.by_gender.is_empty() {
        let _ = writeln!(output, "No gender data.");
    } else {
        group_table(&mut output, "gender", summary.subjects, summary.by_gender);
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Attendance by Year");
    if summary.attendance.is_empty() {
        let _ = writeln!(output, "No attendance data.");
    } else {
        for (year, d) in summary.attendance {
            let _ = writeln!(
                output,
                "- year {}: mean {:.1}%, median {:.1}%, range {:.1}-{:.1}% ({} students)",
                year, d.mean, d.median, d.min, d.max, d.count
            );
        }
    }

    extremes_section(&mut output, "Top Students", summary.top);
    extremes_section(&mut output, "Bottom Students", summary.bottom);

    output
}

pub fn build_leaderboard(year: u8, subject: Subject, standings: &[StudentStanding]) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# Year {year} {subject} Leaderboard");

    if standings.is_empty() {
        let _ = writeln!(output, "No data for year {year} {subject}.");
        return output;
    }

    let _ = writeln!(
        output,
        "| id | section | {subject} | subject rank | overall rank | subject grade | overall grade |"
    );
    let _ = writeln!(output, "|---|---|---|---|---|---|---|");
    for s in standings {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} | {} | {} | {} |",
            s.student_id, s.section, s.score, s.subject_rank, s.overall_rank, s.subject_grade, s.overall_grade
        );
    }
    let _ = writeln!(output);
    let _ = writeln!(output, "Subject rank and grade: within year {year} {subject}.");
    let _ = writeln!(output, "Overall rank and grade: within year {year} total score.");

    output
}

pub fn build_standing(standing: &StudentStanding) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {} ({})", standing.student_id, standing.subject);
    let _ = writeln!(output, "- section: {}", standing.section);
    let _ = writeln!(output, "- score: {}", standing.score);
    let _ = writeln!(
        output,
        "- subject rank {} (grade {})",
        standing.subject_rank, standing.subject_grade
    );
    let _ = writeln!(
        output,
        "- overall rank {} (grade {})",
        standing.overall_rank, standing.overall_grade
    );

    output
}

pub fn build_profile(profile: &StudentProfile) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {} (all subjects)", profile.student_id);
    let _ = writeln!(output, "- year: {}", profile.cohort_year);
    let _ = writeln!(output, "- section: {}", profile.section);
    for result in &profile.subjects {
        let _ = writeln!(
            output,
            "- {}: {} (rank {}, grade {})",
            result.subject, result.score, result.rank, result.grade
        );
    }
    let _ = writeln!(output, "- total: {}", profile.total_score);
    let _ = writeln!(output, "- average: {:.1}", profile.average_score);
    let _ = writeln!(
        output,
        "- overall rank {} (grade {})",
        profile.overall_rank, profile.overall_grade
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SubjectResult;

    fn standing(id: &str, rank: u32) -> StudentStanding {
        StudentStanding {
            student_id: id.to_string(),
            cohort_year: 1,
            section: "B".to_string(),
            subject: Subject::Math,
            score: 91.0,
            subject_rank: rank,
            subject_grade: 1,
            overall_rank: 4,
            overall_grade: 2,
        }
    }

    #[test]
    fn leaderboard_lists_each_standing() {
        let report = build_leaderboard(1, Subject::Math, &[standing("S1000", 1), standing("S1001", 2)]);
        assert!(report.starts_with("# Year 1 math Leaderboard"));
        assert!(report.contains("| S1000 | B | 91 | 1 | 4 | 1 | 2 |"));
        assert!(report.contains("| S1001 | B | 91 | 2 | 4 | 1 | 2 |"));
    }

    #[test]
    fn empty_leaderboard_says_no_data() {
        let report = build_leaderboard(3, Subject::Science, &[]);
        assert!(report.contains("No data for year 3 science."));
    }

    #[test]
    fn profile_lists_every_subject() {
        let profile = StudentProfile {
            student_id: "S1".to_string(),
            cohort_year: 2,
            section: "A".to_string(),
            subjects: vec![
                SubjectResult { subject: Subject::Math, score: 90.0, rank: 1, grade: 1 },
                SubjectResult { subject: Subject::English, score: 70.0, rank: 5, grade: 3 },
            ],
            total_score: 160.0,
            average_score: 80.0,
            overall_rank: 2,
            overall_grade: 2,
        };
        let report = build_profile(&profile);
        assert!(report.contains("- math: 90 (rank 1, grade 1)"));
        assert!(report.contains("- english: 70 (rank 5, grade 3)"));
        assert!(report.contains("- average: 80.0"));
        assert!(report.contains("- overall rank 2 (grade 2)"));
    }

    #[test]
    fn summary_notes_missing_optional_columns() {
        let empty = Extremes { rows: Vec::new(), mean_total: 0.0, mean_average: 0.0 };
        let describe = vec![(Subject::Math, Describe::from_values(&[50.0, 70.0]).unwrap())];
        let summary = Summary {
            subjects: &[Subject::Math],
            describe: &describe,
            by_year: &[],
            by_gender: &[],
            attendance: &[],
            top: &empty,
            bottom: &empty,
        };
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let report = build_summary(date, &summary);

        assert!(report.contains("Generated on 2026-03-02"));
        assert!(report.contains("| math | 2 | 60.0 | 14.1 | 50.0 | 70.0 | 60.0 |"));
        assert!(report.contains("No gender data."));
        assert!(report.contains("No attendance data."));
        assert!(report.contains("## Top Students\nNo students recorded."));
    }
}
