//! Ranking projections over a search's result set.
//!
//! Pure functions: every view the UI draws is recomputed from the raw
//! result slice on each render pass. The sort is std's stable sort, so
//! entries with equal counts keep their original relative order.

use crate::client::SkillCount;

/// How many skills the bar chart shows.
pub const CHART_TOP_N: usize = 12;

/// The chart projection: at most `n` entries, highest count first.
#[must_use]
pub fn top_n(results: &[SkillCount], n: usize) -> Vec<SkillCount> {
    let mut ranked = ranked_all(results);
    ranked.truncate(n);
    ranked
}

/// The table projection: every entry, highest count first.
#[must_use]
pub fn ranked_all(results: &[SkillCount]) -> Vec<SkillCount> {
    let mut ranked = results.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(skill: &str, count: u64) -> SkillCount {
        SkillCount {
            skill: skill.to_string(),
            count,
        }
    }

    #[test]
    fn ranked_all_sorts_descending() {
        let results = vec![entry("SQL", 10), entry("Python", 15), entry("Git", 3)];
        let ranked = ranked_all(&results);
        assert_eq!(ranked[0].skill, "Python");
        assert_eq!(ranked[1].skill, "SQL");
        assert_eq!(ranked[2].skill, "Git");
    }

    #[test]
    fn ranked_all_preserves_tie_order() {
        let results = vec![entry("X", 7), entry("Y", 7), entry("Z", 9)];
        let ranked = ranked_all(&results);
        assert_eq!(ranked[0].skill, "Z");
        assert_eq!(ranked[1].skill, "X");
        assert_eq!(ranked[2].skill, "Y");
    }

    #[test]
    fn ranked_all_is_idempotent() {
        let results = vec![entry("A", 1), entry("B", 5), entry("C", 5)];
        let once = ranked_all(&results);
        let twice = ranked_all(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn top_n_truncates_to_n() {
        let results: Vec<SkillCount> = (0..20).map(|i| entry(&format!("s{i}"), i)).collect();
        let top = top_n(&results, 12);
        assert_eq!(top.len(), 12);
    }

    #[test]
    fn top_n_keeps_the_largest_counts() {
        let results: Vec<SkillCount> = (0..20).map(|i| entry(&format!("s{i}"), i)).collect();
        let top = top_n(&results, 12);
        let cutoff = top.iter().map(|e| e.count).min().unwrap();
        for excluded in results.iter().filter(|e| !top.contains(e)) {
            assert!(excluded.count <= cutoff);
        }
    }

    #[test]
    fn top_n_with_n_larger_than_input() {
        let results = vec![entry("A", 1), entry("B", 2)];
        assert_eq!(top_n(&results, 12).len(), 2);
    }

    #[test]
    fn projections_do_not_mutate_input() {
        let results = vec![entry("low", 1), entry("high", 9)];
        let before = results.clone();
        let _ = top_n(&results, 1);
        let _ = ranked_all(&results);
        assert_eq!(results, before);
    }

    #[test]
    fn empty_input_yields_empty_projections() {
        assert!(top_n(&[], 12).is_empty());
        assert!(ranked_all(&[]).is_empty());
    }

    #[test]
    fn duplicate_labels_survive_unmerged() {
        let results = vec![entry("SQL", 4), entry("SQL", 2)];
        let ranked = ranked_all(&results);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].count, 4);
        assert_eq!(ranked[1].count, 2);
    }
}
