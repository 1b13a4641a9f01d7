/// Tool for toggling a day's completion state
///
/// This module implements the goal_toggle MCP tool: mark a goal done for a
/// calendar day, or unmark it if it was already done. Toggling the same day
/// twice returns the goal to its original state.

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{GoalId, OwnerId};
use crate::progress::{current_streak, day_key, CompletionIndex};
use crate::storage::{GoalStore, StorageError};
use crate::tools::{parse_day, ToolError};

/// Parameters for toggling a goal completion
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ToggleGoalParams {
    /// ID of the goal to toggle
    pub goal_id: String,
    /// Day to toggle (YYYY-MM-DD or RFC 3339 timestamp, optional - defaults to today)
    pub date: Option<String>,
}

/// Response from toggling a goal completion
#[derive(Debug, Serialize)]
pub struct ToggleGoalResponse {
    pub success: bool,
    /// New state of the toggled day
    pub completed: bool,
    /// Current streak after the toggle
    pub current_streak: u32,
    pub message: String,
}

/// Toggle a single day's completion for one of the owner's goals
pub fn toggle_goal<S: GoalStore>(
    storage: &S,
    owner: &OwnerId,
    params: ToggleGoalParams,
) -> Result<ToggleGoalResponse, ToolError> {
    let goal_id = GoalId::from_string(&params.goal_id).map_err(|_| StorageError::GoalNotFound {
        goal_id: params.goal_id.clone(),
    })?;

    let today = day_key(Utc::now());
    let day = match params.date {
        Some(ref s) => parse_day(s)?,
        None => today,
    };

    let mut goal = storage.get_goal(owner, &goal_id)?;

    // Domain validation and the in-memory flip happen together; the new state
    // is then persisted as a single idempotent write
    let completed = goal.toggle_completion(day, today)?;
    storage.set_completion(owner, &goal_id, day, completed)?;

    let streak = current_streak(&CompletionIndex::build(&goal), today);

    let message = if completed {
        format!(
            "🔥 Marked '{}' complete for {}. Current streak: {} day{}",
            goal.name,
            day,
            streak,
            if streak == 1 { "" } else { "s" }
        )
    } else {
        format!(
            "↩️ Unmarked '{}' for {}. Current streak: {} day{}",
            goal.name,
            day,
            streak,
            if streak == 1 { "" } else { "s" }
        )
    };

    Ok(ToggleGoalResponse {
        success: true,
        completed,
        current_streak: streak,
        message,
    })
}
