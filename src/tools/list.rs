/// Tool for listing all goals
///
/// This module implements the goal_list MCP tool.

use chrono::{NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::OwnerId;
use crate::progress::{current_streak, day_key, CompletionIndex};
use crate::storage::GoalStore;
use crate::tools::ToolError;

/// Parameters for listing goals
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListGoalsParams {
    /// Sort by: 'name', 'streak', 'completions' or 'start_date' (default: start_date)
    pub sort_by: Option<String>,
}

/// Information about a goal in the list
#[derive(Debug, Serialize)]
pub struct GoalSummary {
    pub goal_id: String,
    pub name: String,
    pub cadence: String,
    pub start_date: NaiveDate,
    pub current_streak: u32,
    /// Distinct completed days
    pub total_completions: u32,
    pub last_completed: Option<NaiveDate>,
}

/// Response from listing goals
#[derive(Debug, Serialize)]
pub struct ListGoalsResponse {
    pub goals: Vec<GoalSummary>,
    pub total_goals: u32,
    pub message: String,
}

/// List the owner's goals with streak and completion figures
pub fn list_goals<S: GoalStore>(
    storage: &S,
    owner: &OwnerId,
    params: ListGoalsParams,
) -> Result<ListGoalsResponse, ToolError> {
    let today = day_key(Utc::now());
    let goals = storage.list_goals(owner)?;

    let mut summaries: Vec<GoalSummary> = goals
        .iter()
        .map(|goal| {
            let index = CompletionIndex::build(goal);
            GoalSummary {
                goal_id: goal.id.to_string(),
                name: goal.name.clone(),
                cadence: goal.cadence.to_string(),
                start_date: goal.start_date,
                current_streak: current_streak(&index, today),
                total_completions: index.len() as u32,
                last_completed: index.days().max(),
            }
        })
        .collect();

    match params.sort_by.as_deref() {
        Some("name") => summaries.sort_by(|a, b| a.name.cmp(&b.name)),
        Some("streak") => summaries.sort_by(|a, b| b.current_streak.cmp(&a.current_streak)),
        Some("completions") => {
            summaries.sort_by(|a, b| b.total_completions.cmp(&a.total_completions))
        }
        // Storage already returns goals oldest start date first
        _ => {}
    }

    let message = if summaries.is_empty() {
        "No goals yet. Create your first goal to get started!".to_string()
    } else {
        summaries
            .iter()
            .map(|g| {
                format!(
                    "🎯 {} ({})\n   Streak: {} day{} | Completions: {}{}",
                    g.name,
                    g.cadence,
                    g.current_streak,
                    if g.current_streak == 1 { "" } else { "s" },
                    g.total_completions,
                    match g.last_completed {
                        Some(day) => format!(" | Last completed: {}", day),
                        None => String::new(),
                    }
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    Ok(ListGoalsResponse {
        total_goals: summaries.len() as u32,
        goals: summaries,
        message,
    })
}
