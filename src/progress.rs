//! Row totals derived from a pattern and its repetition entries.
//!
//! Everything here is a pure function of its inputs; callers recompute after
//! every edit instead of caching results.

use crate::pattern::{Category, Pattern};
use crate::repetition::{RepetitionEntries, RepetitionEntry};
use crate::session::ConfigState;

/// Stitches one repetition produces: `standard + 2 × increased + decreased`
pub fn stitches_per_rep(pattern: &Pattern) -> u64 {
    pattern.standard_per_rep as u64
        + 2 * pattern.increased_per_rep as u64
        + pattern.decreased_per_rep as u64
}

pub fn total_stitches(pattern: &Pattern) -> u64 {
    stitches_per_rep(pattern).saturating_mul(pattern.reps_count as u64)
}

/// A repetition is complete when every category sits exactly at its cap
pub fn is_rep_complete(pattern: &Pattern, entry: &RepetitionEntry) -> bool {
    Category::ALL
        .iter()
        .all(|&category| entry.get(category) == pattern.cap(category))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub total_done: u64,
    pub reps_completed: u32,
}

/// Sum progress over every repetition `1..=reps_count`, reading missing
/// entries as zero.
pub fn aggregate(pattern: &Pattern, entries: &RepetitionEntries) -> Aggregate {
    entries
        .rows(pattern.reps_count)
        .fold(Aggregate::default(), |mut acc, entry| {
            acc.total_done = acc.total_done.saturating_add(entry.done());
            if is_rep_complete(pattern, &entry) {
                acc.reps_completed += 1;
            }
            acc
        })
}

/// Everything the progress panel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub round: u32,
    pub stitches_per_rep: u64,
    pub total_done: u64,
    pub total_stitches: u64,
    pub reps_completed: u32,
    pub reps_count: u32,
}

impl Summary {
    /// Share of stitches done in `0.0..=1.0`; an empty row counts as done
    pub fn fraction(&self) -> f64 {
        if self.total_stitches == 0 {
            1.0
        } else {
            (self.total_done as f64 / self.total_stitches as f64).clamp(0.0, 1.0)
        }
    }

    pub fn is_row_complete(&self) -> bool {
        self.reps_completed == self.reps_count
    }
}

pub fn summarize(state: &ConfigState) -> Summary {
    let pattern = state.pattern();
    let Aggregate {
        total_done,
        reps_completed,
    } = aggregate(pattern, state.entries());

    Summary {
        round: pattern.round,
        stitches_per_rep: stitches_per_rep(pattern),
        total_done,
        total_stitches: total_stitches(pattern),
        reps_completed,
        reps_count: pattern.reps_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternField;

    fn pattern(standard: u32, increased: u32, decreased: u32, reps: u32) -> Pattern {
        Pattern {
            round: 1,
            standard_per_rep: standard,
            increased_per_rep: increased,
            decreased_per_rep: decreased,
            reps_count: reps,
        }
    }

    fn entry(index: u32, standard: u32, increased: u32, decreased: u32) -> RepetitionEntry {
        RepetitionEntry {
            index,
            standard_done: standard,
            increased_done: increased,
            decreased_done: decreased,
        }
    }

    #[test]
    fn test_default_row_totals() {
        let p = pattern(2, 1, 0, 6);
        assert_eq!(stitches_per_rep(&p), 4);
        assert_eq!(total_stitches(&p), 24);
        assert_eq!(
            aggregate(&p, &RepetitionEntries::new()),
            Aggregate {
                total_done: 0,
                reps_completed: 0
            }
        );
    }

    #[test]
    fn test_single_rep_complete() {
        let p = pattern(2, 1, 0, 6);
        let mut entries = RepetitionEntries::new();
        entries.insert(entry(1, 2, 2, 0));

        assert!(is_rep_complete(&p, &entries.get(1)));
        let agg = aggregate(&p, &entries);
        assert_eq!(agg.total_done, 4);
        assert_eq!(agg.reps_completed, 1);
    }

    #[test]
    fn test_decrease_short_of_cap() {
        let p = pattern(2, 1, 3, 2);
        let mut entries = RepetitionEntries::new();
        entries.insert(entry(1, 2, 2, 3));
        entries.insert(entry(2, 2, 2, 2));

        assert!(is_rep_complete(&p, &entries.get(1)));
        assert!(!is_rep_complete(&p, &entries.get(2)));
        let agg = aggregate(&p, &entries);
        assert_eq!(agg.reps_completed, 1);
        assert_eq!(agg.total_done, 13);
        assert_eq!(total_stitches(&p), 14);
    }

    #[test]
    fn test_each_category_one_below_cap_is_incomplete() {
        let p = pattern(3, 2, 1, 1);
        assert!(is_rep_complete(&p, &entry(1, 3, 4, 1)));
        assert!(!is_rep_complete(&p, &entry(1, 2, 4, 1)));
        assert!(!is_rep_complete(&p, &entry(1, 3, 3, 1)));
        assert!(!is_rep_complete(&p, &entry(1, 3, 4, 0)));
    }

    #[test]
    fn test_zero_caps_make_missing_entries_complete() {
        let p = pattern(0, 0, 0, 3);
        let agg = aggregate(&p, &RepetitionEntries::new());
        assert_eq!(agg.reps_completed, 3);
        assert_eq!(agg.total_done, 0);
        assert_eq!(total_stitches(&p), 0);
    }

    #[test]
    fn test_entries_past_reps_are_ignored() {
        let p = pattern(2, 1, 0, 2);
        let mut entries = RepetitionEntries::new();
        entries.insert(entry(3, 2, 2, 0));
        assert_eq!(aggregate(&p, &entries), Aggregate::default());
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let p = pattern(u32::MAX, u32::MAX, u32::MAX, 1000);
        assert_eq!(stitches_per_rep(&p), 4 * u32::MAX as u64);
        assert_eq!(total_stitches(&p), 4000 * u32::MAX as u64);

        let huge = pattern(u32::MAX, u32::MAX, u32::MAX, u32::MAX);
        assert_eq!(total_stitches(&huge), u64::MAX);
    }

    #[test]
    fn test_summarize_full_row() {
        let mut state = ConfigState::default();
        state.set(PatternField::Round, 3);
        for index in 1..=6 {
            state.fill_rep(index).unwrap();
        }
        let summary = summarize(&state);
        assert_eq!(summary.round, 3);
        assert_eq!(summary.total_done, 24);
        assert_eq!(summary.total_stitches, 24);
        assert_eq!(summary.reps_completed, 6);
        assert!(summary.is_row_complete());
        assert_eq!(summary.fraction(), 1.0);
    }

    #[test]
    fn test_summary_fraction() {
        let mut state = ConfigState::default();
        state.fill_rep(1).unwrap();
        let summary = summarize(&state);
        assert_eq!(summary.total_done, 4);
        assert!((summary.fraction() - 4.0 / 24.0).abs() < 1e-12);
        assert!(!summary.is_row_complete());
    }
}
