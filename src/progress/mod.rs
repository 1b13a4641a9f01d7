/// Goal progress engine
///
/// Pure calendar computations over a snapshot of goals: day keys and
/// time-range bucketing, per-goal completion indexes, current-streak
/// calculation, and cross-goal aggregation. Nothing in this module performs
/// I/O or holds state between calls; every function is a deterministic
/// function of the snapshot and reference dates passed in, so results can be
/// recomputed and compared freely.

pub mod aggregate;
pub mod daykey;
pub mod index;
pub mod streak;

// Re-export public types for easy access
pub use aggregate::*;
pub use daykey::*;
pub use index::*;
pub use streak::*;

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during progress computations
///
/// Out-of-domain completions (before a goal's start date) are deliberately
/// not an error; they are dropped with a logged warning when the completion
/// index is built.
#[derive(Error, Debug)]
pub enum ProgressError {
    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },
}
