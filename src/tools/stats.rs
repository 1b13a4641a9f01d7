/// Tool for dashboard summary statistics
///
/// This module implements the goal_stats MCP tool: the totals behind the
/// dashboard stat cards plus the consistency calendar (days with at least one
/// completed goal).

use chrono::{NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::OwnerId;
use crate::progress::{consistency_days, day_key, summary};
use crate::storage::GoalStore;
use crate::tools::ToolError;

/// Parameters for the stats tool
#[derive(Debug, Deserialize, JsonSchema)]
pub struct StatsParams {
    /// Include the consistency calendar day list (default: false)
    pub include_calendar: Option<bool>,
}

/// Response from the stats tool
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub total_goals: u32,
    pub total_completions: u32,
    pub best_streak: u32,
    /// Days on which at least one goal was completed, oldest first
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consistency_days: Option<Vec<NaiveDate>>,
    pub message: String,
}

/// Compute overall statistics for the owner's goals
pub fn goal_stats<S: GoalStore>(
    storage: &S,
    owner: &OwnerId,
    params: StatsParams,
) -> Result<StatsResponse, ToolError> {
    let today = day_key(Utc::now());
    let goals = storage.list_goals(owner)?;

    let stats = summary(&goals, today);
    let calendar = if params.include_calendar.unwrap_or(false) {
        Some(consistency_days(&goals))
    } else {
        None
    };

    let message = format!(
        "📊 {} goal{} | {} total completion{} | Best streak: {} day{}",
        stats.total_goals,
        if stats.total_goals == 1 { "" } else { "s" },
        stats.total_completions,
        if stats.total_completions == 1 { "" } else { "s" },
        stats.best_streak,
        if stats.best_streak == 1 { "" } else { "s" },
    );

    Ok(StatsResponse {
        total_goals: stats.total_goals,
        total_completions: stats.total_completions,
        best_streak: stats.best_streak,
        consistency_days: calendar,
        message,
    })
}
