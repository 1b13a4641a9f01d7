/// Tool for creating new goals
///
/// This module implements the goal_create MCP tool.

use chrono::Utc;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Cadence, Goal, OwnerId};
use crate::progress::day_key;
use crate::storage::GoalStore;
use crate::tools::{parse_day, ToolError};

/// Parameters for creating a new goal
#[derive(Debug, Deserialize, JsonSchema)]
pub struct CreateGoalParams {
    /// Name of the goal (at least 2 characters)
    pub name: String,
    /// How often the goal is meant to be worked on: daily, weekly or monthly
    pub cadence: String,
    /// First day the goal is in effect (YYYY-MM-DD, optional - defaults to today)
    pub start_date: Option<String>,
}

/// Response from creating a goal
#[derive(Debug, Serialize)]
pub struct CreateGoalResponse {
    pub success: bool,
    pub goal_id: Option<String>,
    pub message: String,
}

/// Create a new goal for the bound owner using the provided storage
pub fn create_goal<S: GoalStore>(
    storage: &S,
    owner: &OwnerId,
    params: CreateGoalParams,
) -> Result<CreateGoalResponse, ToolError> {
    let cadence = Cadence::parse(&params.cadence)?;

    let start_date = match params.start_date {
        Some(ref s) => parse_day(s)?,
        None => day_key(Utc::now()),
    };

    // Name validation happens in the constructor
    let goal = Goal::new(owner.clone(), params.name.clone(), cadence, start_date)?;

    let goal_id = goal.id.to_string();
    storage.create_goal(&goal)?;

    Ok(CreateGoalResponse {
        success: true,
        goal_id: Some(goal_id),
        message: format!("✅ Created {} goal '{}'! Ready to start your streak!", cadence, goal.name),
    })
}
