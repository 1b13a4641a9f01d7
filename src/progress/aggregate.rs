/// Cross-goal aggregation for dashboards
///
/// This module computes the time-bucketed completion counts behind the
/// progress chart, the overall summary statistics, and the consistency
/// calendar. Everything is recomputed from the snapshot on every call;
/// personal goal volumes are small enough that incremental state would buy
/// nothing.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::Goal;
use crate::progress::{bucketize, current_streak, CompletionIndex, Granularity, ProgressError};

/// Completion count for one bucket of the progress chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketCount {
    /// Chart label (e.g. "2024-01-05", "Jan 1", "Jan 2024")
    pub label: String,
    /// First day of the bucket span, inclusive
    pub start: NaiveDate,
    /// Last day of the bucket span, inclusive
    pub end: NaiveDate,
    /// Number of (goal, day) completion pairs inside the span
    pub completions: u32,
}

/// Overall statistics across a user's goals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total_goals: u32,
    /// Sum over goals of their distinct completed days
    pub total_completions: u32,
    /// Highest current streak among the goals, 0 when there are none
    pub best_streak: u32,
}

/// Count completions per bucket across all goals in `[start, end]`
///
/// Each bucket's count is the number of (goal, day) pairs whose completion
/// day falls inside the bucket span; a goal completed on a given day counts
/// once per day regardless of bucket width. Week and month buckets count
/// their full span even where it spills outside the requested range.
pub fn completions_per_bucket(
    goals: &[Goal],
    start: NaiveDate,
    end: NaiveDate,
    granularity: Granularity,
) -> Result<Vec<BucketCount>, ProgressError> {
    let buckets = bucketize(start, end, granularity)?;
    let indexes: Vec<CompletionIndex> = goals.iter().map(CompletionIndex::build).collect();

    Ok(buckets
        .into_iter()
        .map(|bucket| {
            let completions = indexes
                .iter()
                .map(|index| index.days().filter(|&day| bucket.contains(day)).count() as u32)
                .sum();
            BucketCount {
                label: bucket.label(granularity),
                start: bucket.start,
                end: bucket.end,
                completions,
            }
        })
        .collect())
}

/// Compute the dashboard summary for a snapshot of goals
///
/// `today` is the reference day for streak calculation, passed in by the
/// caller rather than read from the clock.
pub fn summary(goals: &[Goal], today: NaiveDate) -> Summary {
    let mut total_completions = 0;
    let mut best_streak = 0;

    for goal in goals {
        let index = CompletionIndex::build(goal);
        total_completions += index.len() as u32;
        best_streak = best_streak.max(current_streak(&index, today));
    }

    Summary {
        total_goals: goals.len() as u32,
        total_completions,
        best_streak,
    }
}

/// Days on which at least one goal was completed, oldest first
///
/// Backs the consistency calendar: a day appears once no matter how many
/// goals were completed on it.
pub fn consistency_days(goals: &[Goal]) -> Vec<NaiveDate> {
    let mut days = BTreeSet::new();
    for goal in goals {
        days.extend(CompletionIndex::build(goal).days());
    }
    days.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Cadence, OwnerId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn goal_named(name: &str, completions: Vec<NaiveDate>) -> Goal {
        let mut goal = Goal::new(
            OwnerId::new("user-1"),
            name.to_string(),
            Cadence::Daily,
            date(2023, 1, 1),
        )
        .unwrap();
        goal.completions = completions;
        goal
    }

    #[test]
    fn test_summary_example() {
        // Goal A completed 2024-01-01..03, goal B never; today is 01-03
        let goal_a = goal_named(
            "Goal A",
            vec![date(2024, 1, 1), date(2024, 1, 2), date(2024, 1, 3)],
        );
        let goal_b = goal_named("Goal B", vec![]);

        let stats = summary(&[goal_a, goal_b], date(2024, 1, 3));
        assert_eq!(
            stats,
            Summary {
                total_goals: 2,
                total_completions: 3,
                best_streak: 3,
            }
        );
    }

    #[test]
    fn test_summary_of_empty_snapshot() {
        let stats = summary(&[], date(2024, 1, 3));
        assert_eq!(stats.total_goals, 0);
        assert_eq!(stats.total_completions, 0);
        assert_eq!(stats.best_streak, 0);
    }

    #[test]
    fn test_total_completions_counts_distinct_days() {
        let day = date(2024, 1, 5);
        // Duplicate day in the raw snapshot collapses before counting
        let goal = goal_named("Dup", vec![day, day]);
        let stats = summary(&[goal], date(2024, 1, 5));
        assert_eq!(stats.total_completions, 1);
    }

    #[test]
    fn test_day_bucket_coverage_and_counts() {
        let start = date(2024, 1, 1);
        let end = date(2024, 1, 7);
        let goal_a = goal_named("A", vec![date(2024, 1, 1), date(2024, 1, 3)]);
        let goal_b = goal_named("B", vec![date(2024, 1, 3), date(2024, 1, 10)]);

        let counts = completions_per_bucket(&[goal_a, goal_b], start, end, Granularity::Day).unwrap();

        // One bucket per day of the inclusive range
        assert_eq!(counts.len(), 7);
        // Two goals on the 3rd counts twice; out-of-range 01-10 is excluded
        assert_eq!(counts[0].completions, 1);
        assert_eq!(counts[2].completions, 2);
        let total: u32 = counts.iter().map(|c| c.completions).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_week_bucket_counts_full_span() {
        // Range starts Wednesday 2024-01-03; the Monday 01-01 completion still
        // lands in the first week bucket because the span backs up to Monday.
        let goal = goal_named("A", vec![date(2024, 1, 1), date(2024, 1, 4)]);
        let counts =
            completions_per_bucket(&[goal], date(2024, 1, 3), date(2024, 1, 7), Granularity::Week)
                .unwrap();

        assert_eq!(counts.len(), 1);
        assert_eq!(counts[0].start, date(2024, 1, 1));
        assert_eq!(counts[0].completions, 2);
    }

    #[test]
    fn test_month_buckets_split_counts() {
        let goal = goal_named(
            "A",
            vec![date(2024, 1, 31), date(2024, 2, 1), date(2024, 2, 15)],
        );
        let counts =
            completions_per_bucket(&[goal], date(2024, 1, 1), date(2024, 2, 28), Granularity::Month)
                .unwrap();

        assert_eq!(counts.len(), 2);
        assert_eq!(counts[0].completions, 1);
        assert_eq!(counts[1].completions, 2);
    }

    #[test]
    fn test_inverted_range_propagates_error() {
        let result =
            completions_per_bucket(&[], date(2024, 1, 2), date(2024, 1, 1), Granularity::Day);
        assert!(result.is_err());
    }

    #[test]
    fn test_consistency_days_dedup_across_goals() {
        let shared = date(2024, 1, 2);
        let goal_a = goal_named("A", vec![date(2024, 1, 1), shared]);
        let goal_b = goal_named("B", vec![shared, date(2024, 1, 4)]);

        let days = consistency_days(&[goal_a, goal_b]);
        assert_eq!(days, vec![date(2024, 1, 1), shared, date(2024, 1, 4)]);
    }
}
