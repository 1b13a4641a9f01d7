/// Tool for updating existing goals
///
/// This module implements the goal_update MCP tool to modify a goal's name,
/// cadence, or start date.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Cadence, GoalId, OwnerId};
use crate::storage::{GoalStore, StorageError};
use crate::tools::{parse_day, ToolError};

/// Parameters for updating an existing goal
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateGoalParams {
    /// ID of the goal to update
    pub goal_id: String,
    /// New name (optional)
    pub name: Option<String>,
    /// New cadence: daily, weekly or monthly (optional)
    pub cadence: Option<String>,
    /// New start date (YYYY-MM-DD, optional)
    pub start_date: Option<String>,
}

/// Response from updating a goal
#[derive(Debug, Serialize)]
pub struct UpdateGoalResponse {
    pub success: bool,
    pub message: String,
}

/// Update one of the owner's goals using the provided storage
pub fn update_goal<S: GoalStore>(
    storage: &S,
    owner: &OwnerId,
    params: UpdateGoalParams,
) -> Result<UpdateGoalResponse, ToolError> {
    // Parse and validate the goal ID
    let goal_id = GoalId::from_string(&params.goal_id).map_err(|_| StorageError::GoalNotFound {
        goal_id: params.goal_id.clone(),
    })?;

    // Fetch the existing goal
    let mut goal = storage.get_goal(owner, &goal_id)?;

    let cadence = match params.cadence {
        Some(ref s) => Some(Cadence::parse(s)?),
        None => None,
    };
    let start_date = match params.start_date {
        Some(ref s) => Some(parse_day(s)?),
        None => None,
    };

    // Validate and apply the updates
    goal.update(params.name, cadence, start_date)?;

    // Save the updated goal
    storage.update_goal(&goal)?;

    Ok(UpdateGoalResponse {
        success: true,
        message: format!("✅ Updated goal '{}'", goal.name),
    })
}
