/// Core types used throughout the domain layer
///
/// This module defines the identifier newtypes and the Cadence enum that are
/// used by Goal and the other domain entities.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a goal
///
/// This is a wrapper around UUID to provide type safety - you can't
/// accidentally pass an owner id where a goal id is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalId(pub Uuid);

impl GoalId {
    /// Generate a new random goal ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a goal ID from a string (useful for database loading)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for GoalId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for GoalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier of the user who owns a goal
///
/// Supplied by the identity collaborator at startup. The structure of the
/// string is never interpreted; it is only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How often a goal is meant to be worked on
///
/// Stored per goal and surfaced in listings. Streaks and aggregation count
/// daily completions identically for all cadences; the value is informational.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    /// Every single day
    Daily,
    /// Once or more per week
    Weekly,
    /// Once or more per month
    Monthly,
}

impl Cadence {
    /// Parse a cadence from its lowercase wire form
    pub fn parse(s: &str) -> Result<Self, crate::domain::DomainError> {
        match s.trim().to_lowercase().as_str() {
            "daily" => Ok(Cadence::Daily),
            "weekly" => Ok(Cadence::Weekly),
            "monthly" => Ok(Cadence::Monthly),
            other => Err(crate::domain::DomainError::InvalidCadence(format!(
                "Invalid cadence '{}'. Valid options: daily, weekly, monthly",
                other
            ))),
        }
    }

    /// Get the lowercase wire/display form of this cadence
    pub fn as_str(&self) -> &'static str {
        match self {
            Cadence::Daily => "daily",
            Cadence::Weekly => "weekly",
            Cadence::Monthly => "monthly",
        }
    }
}

impl std::fmt::Display for Cadence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
