/// Per-goal completion membership index
///
/// This module converts a goal's unordered completion list into a set of
/// calendar days for O(1) membership tests by the streak calculator and the
/// aggregator.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::Goal;

/// Day-level membership structure for a single goal's completions
///
/// Duplicate days collapse to one entry by construction, so the index size is
/// at most the completion list length, with equality iff all completions fall
/// on distinct days.
#[derive(Debug, Clone, Default)]
pub struct CompletionIndex {
    days: HashSet<NaiveDate>,
}

impl CompletionIndex {
    /// Build the index from a goal snapshot
    ///
    /// Completions before the goal's start date are dropped with a warning
    /// rather than failing the computation: they can legitimately arise from
    /// clock skew, late-arriving sync data, or the start date being moved
    /// forward after the fact.
    pub fn build(goal: &Goal) -> Self {
        let mut days = HashSet::with_capacity(goal.completions.len());

        for &day in &goal.completions {
            if day < goal.start_date {
                tracing::warn!(
                    goal_id = %goal.id,
                    %day,
                    start_date = %goal.start_date,
                    "Dropping completion before goal start date"
                );
                continue;
            }
            days.insert(day);
        }

        Self { days }
    }

    /// Membership test for a single calendar day
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.days.contains(&day)
    }

    /// Number of distinct completed days
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Iterate over the distinct completed days, in no particular order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days.iter().copied()
    }
}
