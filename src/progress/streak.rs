/// Current-streak calculation
///
/// This module computes the consecutive-day streak for a goal from its
/// completion index, with a one-day grace period for users who have not yet
/// acted today.

use chrono::{Duration, NaiveDate};

use crate::progress::CompletionIndex;

/// Count the unbroken run of completed days ending at `today` or yesterday
///
/// If today is completed the walk starts there; otherwise yesterday is
/// checked, so a user who completed a goal yesterday but has not yet acted
/// today still sees the streak alive until the day fully elapses. When
/// neither day is completed the streak is 0. Older isolated runs are ignored;
/// this is the current streak, not the longest ever.
///
/// `today` is the caller's reference day (see `day_key`), passed explicitly
/// so the computation stays a pure function of its inputs.
pub fn current_streak(index: &CompletionIndex, today: NaiveDate) -> u32 {
    let anchor = if index.contains(today) {
        today
    } else if index.contains(today - Duration::days(1)) {
        today - Duration::days(1)
    } else {
        return 0;
    };

    let mut streak = 1;
    let mut day = anchor - Duration::days(1);
    while index.contains(day) {
        streak += 1;
        day -= Duration::days(1);
    }

    streak
}
