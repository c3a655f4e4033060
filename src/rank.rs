//! Competition ranking with "min" ties: equal scores share the best rank
//! in their tie group and the next distinct score skips past the group.

use std::collections::HashMap;
use std::hash::Hash;

/// Ranks for scores already sorted descending, positionally aligned.
pub fn min_ranks(sorted_scores: &[f64]) -> Vec<u32> {
    let mut ranks = Vec::with_capacity(sorted_scores.len());
    for (position, score) in sorted_scores.iter().enumerate() {
        let rank = match ranks.last() {
            Some(previous) if sorted_scores[position - 1] == *score => *previous,
            _ => position as u32 + 1,
        };
        ranks.push(rank);
    }
    ranks
}

/// Ranks arbitrary `(identity, score)` pairs, higher score first.
pub fn rank_by_score<K>(entries: impl IntoIterator<Item = (K, f64)>) -> HashMap<K, u32>
where
    K: Eq + Hash,
{
    let mut entries: Vec<(K, f64)> = entries.into_iter().collect();
    sort_descending(&mut entries, |(_, score)| *score);
    let scores: Vec<f64> = entries.iter().map(|(_, score)| *score).collect();

    entries
        .into_iter()
        .zip(min_ranks(&scores))
        .map(|((key, _), rank)| (key, rank))
        .collect()
}

/// Stable descending sort, so ties keep their input order.
pub fn sort_descending<T>(items: &mut [T], score: impl Fn(&T) -> f64) {
    items.sort_by(|a, b| score(b).total_cmp(&score(a)));
}
