/// Tool for time-bucketed progress chart data
///
/// This module implements the goal_chart MCP tool. It supports the three
/// dashboard presets (week, month, year) as well as an explicit range with a
/// chosen bucket granularity.

use chrono::{Duration, Months, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::OwnerId;
use crate::progress::{completions_per_bucket, day_key, BucketCount, Granularity};
use crate::storage::GoalStore;
use crate::tools::{parse_day, ToolError};

/// Parameters for the chart tool
///
/// Either a preset `period` or an explicit `start`/`end` range. The presets
/// mirror the dashboard tabs: `week` = last 7 days bucketed daily, `month` =
/// last month bucketed by ISO week, `year` = last 12 months bucketed monthly.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ChartParams {
    /// Preset period: 'week', 'month' or 'year' (optional)
    pub period: Option<String>,
    /// Range start (YYYY-MM-DD, required when no period is given)
    pub start: Option<String>,
    /// Range end (YYYY-MM-DD, required when no period is given)
    pub end: Option<String>,
    /// Bucket granularity for an explicit range: 'day', 'week' or 'month' (default: day)
    pub granularity: Option<String>,
}

/// Response from the chart tool
#[derive(Debug, Serialize)]
pub struct ChartResponse {
    pub buckets: Vec<BucketCount>,
    pub message: String,
}

/// Resolve the requested range and granularity
fn resolve_range(
    params: &ChartParams,
    today: NaiveDate,
) -> Result<(NaiveDate, NaiveDate, Granularity), ToolError> {
    if let Some(ref period) = params.period {
        return match period.trim().to_lowercase().as_str() {
            "week" => Ok((today - Duration::days(6), today, Granularity::Day)),
            "month" => Ok((today - Months::new(1), today, Granularity::Week)),
            "year" => Ok((today - Months::new(11), today, Granularity::Month)),
            other => Err(ToolError::InvalidParams(format!(
                "Invalid period '{}'. Valid options: week, month, year",
                other
            ))),
        };
    }

    let (start, end) = match (&params.start, &params.end) {
        (Some(s), Some(e)) => (parse_day(s)?, parse_day(e)?),
        _ => {
            return Err(ToolError::InvalidParams(
                "Provide either a period or both start and end".to_string(),
            ))
        }
    };

    let granularity = match params.granularity {
        Some(ref s) => Granularity::parse(s).ok_or_else(|| {
            ToolError::InvalidParams(format!(
                "Invalid granularity '{}'. Valid options: day, week, month",
                s
            ))
        })?,
        None => Granularity::Day,
    };

    Ok((start, end, granularity))
}

/// Compute per-bucket completion counts for the owner's goals
pub fn goal_chart<S: GoalStore>(
    storage: &S,
    owner: &OwnerId,
    params: ChartParams,
) -> Result<ChartResponse, ToolError> {
    let today = day_key(Utc::now());
    let (start, end, granularity) = resolve_range(&params, today)?;

    let goals = storage.list_goals(owner)?;
    let buckets = completions_per_bucket(&goals, start, end, granularity)?;

    let message = buckets
        .iter()
        .map(|b| format!("{}: {}", b.label, b.completions))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(ChartResponse { buckets, message })
}
