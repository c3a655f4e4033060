//! Descriptive statistics over the score table, for reporting.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{DerivedRow, ScoreTable, StudentRecord, Subject};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Describe {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1); zero for fewer than two values.
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl Describe {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = mean(values);
        let std_dev = if count < 2 {
            0.0
        } else {
            let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (squares / (count - 1) as f64).sqrt()
        };

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let median = if count % 2 == 0 {
            (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
        } else {
            sorted[count / 2]
        };

        Some(Self {
            count,
            mean,
            std_dev,
            min: sorted[0],
            max: sorted[count - 1],
            median,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMeans<K> {
    pub key: K,
    pub count: usize,
    pub means: Vec<(Subject, f64)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Extremes {
    pub rows: Vec<DerivedRow>,
    pub mean_total: f64,
    pub mean_average: f64,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn describe_subjects(table: &ScoreTable, subjects: &[Subject]) -> Vec<(Subject, Describe)> {
    subjects
        .iter()
        .filter_map(|subject| {
            let values: Vec<f64> = table.records().iter().map(|r| r.score(*subject)).collect();
            Describe::from_values(&values).map(|d| (*subject, d))
        })
        .collect()
}

fn group_means<K: Ord>(
    records: &[StudentRecord],
    subjects: &[Subject],
    key: impl Fn(&StudentRecord) -> Option<K>,
) -> Vec<GroupMeans<K>> {
    let mut groups: BTreeMap<K, Vec<&StudentRecord>> = BTreeMap::new();
    for record in records {
        if let Some(k) = key(record) {
            groups.entry(k).or_default().push(record);
        }
    }

    groups
        .into_iter()
        .map(|(key, members)| GroupMeans {
            key,
            count: members.len(),
            means: subjects
                .iter()
                .map(|subject| {
                    let values: Vec<f64> = members.iter().map(|r| r.score(*subject)).collect();
                    (*subject, mean(&values))
                })
                .collect(),
        })
        .collect()
}

pub fn means_by_year(table: &ScoreTable, subjects: &[Subject]) -> Vec<GroupMeans<u8>> {
    group_means(table.records(), subjects, |r| Some(r.cohort_year))
}

/// Empty when the table carries no gender column.
pub fn means_by_gender(table: &ScoreTable, subjects: &[Subject]) -> Vec<GroupMeans<String>> {
    group_means(table.records(), subjects, |r| r.gender.clone())
}

/// Attendance distribution per cohort year, skipping students without a rate.
pub fn attendance_by_year(table: &ScoreTable) -> Vec<(u8, Describe)> {
    let mut groups: BTreeMap<u8, Vec<f64>> = BTreeMap::new();
    for record in table.records() {
        if let Some(rate) = record.attendance_rate {
            groups.entry(record.cohort_year).or_default().push(rate);
        }
    }
    groups
        .into_iter()
        .filter_map(|(year, rates)| Describe::from_values(&rates).map(|d| (year, d)))
        .collect()
}

/// Top `n` of already-ranked rows.
pub fn top_n(ranked: &[DerivedRow], n: usize) -> Extremes {
    extremes(ranked.iter().take(n).cloned().collect())
}

/// Bottom `n` of already-ranked rows, lowest total first.
pub fn bottom_n(ranked: &[DerivedRow], n: usize) -> Extremes {
    extremes(ranked.iter().rev().take(n).cloned().collect())
}

fn extremes(rows: Vec<DerivedRow>) -> Extremes {
    let totals: Vec<f64> = rows.iter().map(|r| r.total_score).collect();
    let averages: Vec<f64> = rows.iter().map(|r| r.average_score).collect();
    Extremes {
        mean_total: mean(&totals),
        mean_average: mean(&averages),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cohort::CohortGrader;
    use crate::config::GradingConfig;
    use crate::models::fixtures::{student, table};

    #[test]
    fn describe_matches_hand_computed_values() {
        let d = Describe::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(d.count, 8);
        assert_eq!(d.mean, 5.0);
        assert_eq!(d.min, 2.0);
        assert_eq!(d.max, 9.0);
        assert_eq!(d.median, 4.5);
        assert!((d.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn describe_edge_cases() {
        assert!(Describe::from_values(&[]).is_none());
        let single = Describe::from_values(&[42.0]).unwrap();
        assert_eq!(single.std_dev, 0.0);
        assert_eq!(single.median, 42.0);
    }

    #[test]
    fn year_and_gender_means() {
        let mut a = student("A", 1, 80.0, 60.0, 40.0);
        a.gender = Some("F".to_string());
        let mut b = student("B", 1, 60.0, 80.0, 60.0);
        b.gender = Some("M".to_string());
        let mut c = student("C", 2, 90.0, 90.0, 90.0);
        c.gender = Some("F".to_string());
        let table = table(vec![a, b, c]);

        let by_year = means_by_year(&table, &Subject::ALL);
        assert_eq!(by_year.len(), 2);
        assert_eq!(by_year[0].key, 1);
        assert_eq!(by_year[0].count, 2);
        assert_eq!(by_year[0].means[0], (Subject::Math, 70.0));

        let by_gender = means_by_gender(&table, &[Subject::Science]);
        assert_eq!(by_gender[0].key, "F");
        assert_eq!(by_gender[0].means, vec![(Subject::Science, 65.0)]);
        assert_eq!(by_gender[1].key, "M");
    }

    #[test]
    fn gender_means_are_empty_without_the_column() {
        let table = table(vec![student("A", 1, 1.0, 1.0, 1.0)]);
        assert!(means_by_gender(&table, &Subject::ALL).is_empty());
        assert!(attendance_by_year(&table).is_empty());
    }

    #[test]
    fn attendance_is_summarised_per_year() {
        let mut a = student("A", 1, 1.0, 1.0, 1.0);
        a.attendance_rate = Some(90.0);
        let mut b = student("B", 1, 1.0, 1.0, 1.0);
        b.attendance_rate = Some(70.0);
        let c = student("C", 1, 1.0, 1.0, 1.0);
        let table = table(vec![a, b, c]);

        let summary = attendance_by_year(&table);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].0, 1);
        assert_eq!(summary[0].1.count, 2);
        assert_eq!(summary[0].1.mean, 80.0);
    }

    #[test]
    fn top_and_bottom_students() {
        let table = table(vec![
            student("A", 1, 10.0, 10.0, 10.0),
            student("B", 2, 30.0, 30.0, 30.0),
            student("C", 3, 20.0, 20.0, 20.0),
        ]);
        let config = GradingConfig::default();
        let ranked = CohortGrader::new(&config).grade_all(&table);

        let top = top_n(&ranked, 2);
        let ids: Vec<&str> = top.rows.iter().map(|r| r.record.id.as_str()).collect();
        assert_eq!(ids, vec!["B", "C"]);
        assert_eq!(top.mean_total, 75.0);
        assert_eq!(top.mean_average, 25.0);

        let bottom = bottom_n(&ranked, 1);
        assert_eq!(bottom.rows[0].record.id, "A");
        assert_eq!(bottom.mean_total, 30.0);
    }
}
