//! Quota-based grade assignment.
//!
//! Tier `i` receives `floor(n * quota[i])` students, filled in rank order.
//! Ties are not considered: two equal scores can straddle a tier boundary.
//! Whatever the floors leave over goes to tier 5.

use crate::config::{GradeQuota, TIERS};

/// Member count of each tier for a group of `n` students.
pub fn quota_counts(n: usize, quota: &GradeQuota) -> [usize; TIERS] {
    let mut counts = [0; TIERS];
    for (count, fraction) in counts.iter_mut().zip(quota.fractions()) {
        *count = (n as f64 * fraction).floor() as usize;
    }
    counts
}

/// Assigns grades 1..=5 to scores the caller has already sorted descending.
///
/// The returned grades line up positionally with `sorted_scores`.
pub fn assign_grades(sorted_scores: &[f64], quota: &GradeQuota) -> Vec<u8> {
    debug_assert!(sorted_scores.windows(2).all(|pair| pair[0] >= pair[1]));
    let n = sorted_scores.len();
    let mut grades = Vec::with_capacity(n);
    for (tier, count) in quota_counts(n, quota).into_iter().enumerate() {
        grades.extend(std::iter::repeat(tier as u8 + 1).take(count));
    }

    if grades.len() < n {
        grades.resize(n, TIERS as u8);
    } else {
        grades.truncate(n);
    }
    grades
}
