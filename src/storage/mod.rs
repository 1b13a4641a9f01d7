/// Storage layer for persisting goal data
///
/// This module handles all database operations using SQLite. It provides the
/// persistence collaborator the progress engine consumes snapshots from:
/// owner-scoped CRUD plus the day-level completion records.

pub mod migrations;
pub mod sqlite;

// Re-export the main storage types
pub use sqlite::*;

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{Goal, GoalId, OwnerId};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Goal not found: {goal_id}")]
    GoalNotFound { goal_id: String },

    #[error("Migration error: {0}")]
    Migration(String),
}

/// Trait defining the storage interface for goals
///
/// Every operation is scoped to an owner: a goal is invisible and immutable
/// to any other owner value. This trait allows swapping out SQLite for other
/// backends while keeping the same interface.
pub trait GoalStore {
    /// Create a new goal
    fn create_goal(&self, goal: &Goal) -> Result<(), StorageError>;

    /// Get one of the owner's goals by ID, with its completion days loaded
    fn get_goal(&self, owner: &OwnerId, goal_id: &GoalId) -> Result<Goal, StorageError>;

    /// Update a goal's editable fields (name, cadence, start date)
    fn update_goal(&self, goal: &Goal) -> Result<(), StorageError>;

    /// Delete a goal and discard its entire completion history
    fn delete_goal(&self, owner: &OwnerId, goal_id: &GoalId) -> Result<(), StorageError>;

    /// Snapshot of all the owner's goals, completions included, oldest
    /// start date first
    fn list_goals(&self, owner: &OwnerId) -> Result<Vec<Goal>, StorageError>;

    /// Persist the completion state of a single (goal, day) pair
    ///
    /// Idempotent in both directions: setting an already-completed day
    /// completed (or an absent one absent) is a no-op, so a toggle that
    /// races a concurrent edit never duplicates a day.
    fn set_completion(
        &self,
        owner: &OwnerId,
        goal_id: &GoalId,
        day: NaiveDate,
        completed: bool,
    ) -> Result<(), StorageError>;
}
