//! Analytics report types and rate arithmetic.
//!
//! The aggregator owns the numeric coercion boundary: every figure in a
//! report is a well-typed integer or float, never a string rendering.

use crate::tracker::domain::TaskPriority;
use crate::tracker::services::ActivityView;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Rounded percentage of `done` over `total`; 0 when `total` is not
/// positive. Never divides by zero, never produces NaN.
#[must_use]
pub fn completion_rate(done: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (100.0 * done as f64 / total as f64).round() as i64
}

/// Board-wide task statistics computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    /// Number of tasks on the board.
    pub total_tasks: i64,
    /// Tasks in `todo`.
    pub todo_tasks: i64,
    /// Tasks in `in_progress`.
    pub in_progress_tasks: i64,
    /// Tasks in `done`.
    pub completed_tasks: i64,
    /// `round(100 × done/total)`; 0 for an empty board.
    pub completion_rate: i64,
    /// Sum of story points.
    pub total_story_points: i64,
    /// Sum of story points over `done` tasks.
    pub completed_story_points: i64,
    /// `round(100 × completed points/total points)`; 0 when no points.
    pub story_points_completion_rate: i64,
    /// Mean story points per task; 0 for an empty board.
    pub avg_story_points: f64,
}

impl Overview {
    /// An all-zero overview for an empty board.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            total_tasks: 0,
            todo_tasks: 0,
            in_progress_tasks: 0,
            completed_tasks: 0,
            completion_rate: 0,
            total_story_points: 0,
            completed_story_points: 0,
            story_points_completion_rate: 0,
            avg_story_points: 0.0,
        }
    }
}

/// One day in the creation/completion trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Calendar date bucket.
    pub date: NaiveDate,
    /// Tasks created on this date.
    pub tasks_created: i64,
    /// Tasks created on this date that are now done.
    pub tasks_completed: i64,
}

/// Per-user activity totals over the trailing window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserActivitySummary {
    /// Login name.
    pub username: String,
    /// Total task activities attributed to the user.
    pub activity_count: i64,
    /// `created` activities.
    pub tasks_created: i64,
    /// `updated` activities.
    pub tasks_updated: i64,
}

/// Task counts for one priority level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBucket {
    /// Priority level.
    pub priority: TaskPriority,
    /// Tasks at this priority.
    pub count: i64,
    /// Done tasks at this priority.
    pub completed_count: i64,
    /// `round(100 × completed/count)`; 0 when the bucket is empty.
    pub completion_rate: i64,
}

/// Task totals restricted to a sprint's creation-date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SprintTotals {
    /// Tasks created within the sprint window.
    pub total_tasks: i64,
    /// Of those, tasks now done.
    pub completed_tasks: i64,
    /// Story points created within the window.
    pub total_story_points: i64,
    /// Story points of done tasks within the window.
    pub completed_story_points: i64,
}

/// Full analytics rollup for a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Board-wide statistics.
    pub overview: Overview,
    /// 30-day creation/completion trend, newest date first.
    pub task_trend: Vec<TrendPoint>,
    /// Per-user task activity over the last 30 days, busiest first.
    pub user_activity: Vec<UserActivitySummary>,
    /// Priority distribution; only priorities with tasks appear.
    pub priority_distribution: Vec<PriorityBucket>,
    /// The 20 most recent activities across all entities.
    pub recent_activities: Vec<ActivityView>,
    /// Sprint-window totals when a sprint was requested.
    pub sprint_analytics: Option<SprintTotals>,
}
