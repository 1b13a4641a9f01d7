/// MCP tools for goal management
///
/// This module contains all the MCP tools that external clients (like Claude)
/// can call to manage goals and read progress statistics.

// Tool implementations will go in separate files
pub mod chart;
pub mod create;
pub mod delete;
pub mod list;
pub mod stats;
pub mod toggle;
pub mod update;

// Re-export tool functions for easy access
pub use chart::*;
pub use create::*;
pub use delete::*;
pub use list::*;
pub use stats::*;
pub use toggle::*;
pub use update::*;

use chrono::{DateTime, NaiveDate};
use thiserror::Error;

use crate::domain::DomainError;
use crate::progress::{day_key, ProgressError};
use crate::storage::StorageError;

/// Errors that can occur while executing a tool
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid parameters: {0}")]
    InvalidParams(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Progress(#[from] ProgressError),
}

/// Parse a calendar day from tool input
///
/// Accepts a plain `YYYY-MM-DD` day or an RFC 3339 timestamp, which is
/// collapsed to its UTC day key.
pub(crate) fn parse_day(s: &str) -> Result<NaiveDate, ToolError> {
    let trimmed = s.trim();

    if let Ok(day) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(day);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(day_key(instant.with_timezone(&chrono::Utc)));
    }

    Err(ToolError::InvalidParams(format!(
        "Invalid date '{}': expected YYYY-MM-DD or an RFC 3339 timestamp",
        s
    )))
}
