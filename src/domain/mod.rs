/// Domain module containing core business logic and data types
///
/// This module defines the core entities (Goal, GoalId, Cadence) and their
/// validation rules. These types represent the fundamental concepts in the
/// TripTailor goal tracking system.

pub mod goal;
pub mod types;

// Re-export public types for easy access
pub use goal::*;
pub use types::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid goal name: {0}")]
    InvalidGoalName(String),

    #[error("Invalid cadence: {0}")]
    InvalidCadence(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}
