/// Tool for deleting goals
///
/// This module implements the goal_delete MCP tool. Deleting a goal discards
/// its entire completion history.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{GoalId, OwnerId};
use crate::storage::{GoalStore, StorageError};
use crate::tools::ToolError;

/// Parameters for deleting a goal
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteGoalParams {
    /// ID of the goal to delete
    pub goal_id: String,
}

/// Response from deleting a goal
#[derive(Debug, Serialize)]
pub struct DeleteGoalResponse {
    pub success: bool,
    pub message: String,
}

/// Delete one of the owner's goals using the provided storage
pub fn delete_goal<S: GoalStore>(
    storage: &S,
    owner: &OwnerId,
    params: DeleteGoalParams,
) -> Result<DeleteGoalResponse, ToolError> {
    let goal_id = GoalId::from_string(&params.goal_id).map_err(|_| StorageError::GoalNotFound {
        goal_id: params.goal_id.clone(),
    })?;

    // Fetch first so the confirmation message can name the goal
    let goal = storage.get_goal(owner, &goal_id)?;
    storage.delete_goal(owner, &goal_id)?;

    tracing::info!(goal_id = %goal_id, "Deleted goal '{}'", goal.name);

    Ok(DeleteGoalResponse {
        success: true,
        message: format!(
            "🗑️ Deleted goal '{}' and its {} logged completion{}",
            goal.name,
            goal.completions.len(),
            if goal.completions.len() == 1 { "" } else { "s" }
        ),
    })
}
