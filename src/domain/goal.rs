/// Goal entity and related functionality
///
/// This module defines the core Goal struct that represents a recurring goal a
/// user wants to track, along with validation and the day-level completion
/// toggle.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Cadence, DomainError, GoalId, OwnerId};

/// A recurring goal tracked by a single user
///
/// Each goal has a name, a cadence (how often it is meant to be worked on), a
/// start date, and the set of calendar days on which it was marked done.
/// Completions are day-level: the same day never appears twice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Unique identifier for this goal
    pub id: GoalId,
    /// The user who owns this goal; only the owner can see or change it
    pub owner_id: OwnerId,
    /// Display name (e.g., "Morning run", "Practice Spanish")
    pub name: String,
    /// How often this goal is meant to be worked on
    pub cadence: Cadence,
    /// First day the goal is in effect; completions before this day are invalid
    pub start_date: NaiveDate,
    /// Calendar days on which the goal was marked done, unordered
    pub completions: Vec<NaiveDate>,
    /// When this goal was created
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// Create a new goal with validation
    ///
    /// The id is assigned here and the completion list starts empty.
    pub fn new(
        owner_id: OwnerId,
        name: String,
        cadence: Cadence,
        start_date: NaiveDate,
    ) -> Result<Self, DomainError> {
        Self::validate_name(&name)?;

        Ok(Self {
            id: GoalId::new(),
            owner_id,
            name,
            cadence,
            start_date,
            completions: Vec::new(),
            created_at: Utc::now(),
        })
    }

    /// Create a goal from existing data (used when loading from the database)
    ///
    /// This constructor assumes data is already validated and is mainly used
    /// by the storage layer when loading goals from the database.
    pub fn from_existing(
        id: GoalId,
        owner_id: OwnerId,
        name: String,
        cadence: Cadence,
        start_date: NaiveDate,
        completions: Vec<NaiveDate>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner_id,
            name,
            cadence,
            start_date,
            completions,
            created_at,
        }
    }

    /// Update the goal's editable fields with validation
    ///
    /// `id` and `owner_id` are immutable once assigned and cannot be changed
    /// here.
    pub fn update(
        &mut self,
        name: Option<String>,
        cadence: Option<Cadence>,
        start_date: Option<NaiveDate>,
    ) -> Result<(), DomainError> {
        if let Some(ref new_name) = name {
            Self::validate_name(new_name)?;
        }

        if let Some(new_name) = name {
            self.name = new_name;
        }
        if let Some(new_cadence) = cadence {
            self.cadence = new_cadence;
        }
        if let Some(new_start) = start_date {
            self.start_date = new_start;
        }

        Ok(())
    }

    /// Check whether the goal was marked done on the given day
    pub fn is_completed_on(&self, day: NaiveDate) -> bool {
        self.completions.contains(&day)
    }

    /// Toggle the completion state of a single day
    ///
    /// Removes the day if present, adds it otherwise, so toggling twice
    /// restores the original state. Returns the new state: `true` when the
    /// day is now completed. Days before `start_date` or after `today` are
    /// rejected.
    pub fn toggle_completion(
        &mut self,
        day: NaiveDate,
        today: NaiveDate,
    ) -> Result<bool, DomainError> {
        if day < self.start_date {
            return Err(DomainError::InvalidDate(format!(
                "Cannot mark {} complete before the goal's start date {}",
                day, self.start_date
            )));
        }
        if day > today {
            return Err(DomainError::InvalidDate(
                "Cannot mark future days complete".to_string(),
            ));
        }

        if let Some(pos) = self.completions.iter().position(|c| *c == day) {
            self.completions.remove(pos);
            Ok(false)
        } else {
            self.completions.push(day);
            Ok(true)
        }
    }

    /// Validate a goal name according to business rules
    fn validate_name(name: &str) -> Result<(), DomainError> {
        let trimmed = name.trim();

        if trimmed.chars().count() < 2 {
            return Err(DomainError::InvalidGoalName(
                "Goal name must be at least 2 characters".to_string(),
            ));
        }

        if trimmed.chars().count() > 100 {
            return Err(DomainError::InvalidGoalName(
                "Goal name cannot be longer than 100 characters".to_string(),
            ));
        }

        Ok(())
    }
}
