//! Read-side analytics aggregation over the tracker ports.

use super::report::{
    completion_rate, AnalyticsReport, Overview, PriorityBucket, SprintTotals, TrendPoint,
    UserActivitySummary,
};
use crate::tracker::{
    domain::{Activity, BoardId, SprintId, Task, TaskPriority, TaskStatus, UserDisplay, UserId},
    ports::{
        ActivityFilter, ActivityRepository, ActivityRepositoryError, BoardRepository,
        BoardRepositoryError, SprintRepository, SprintRepositoryError, TaskRepository,
        TaskRepositoryError, UserRepository, UserRepositoryError,
    },
    services::{ActivityView, ErrorKind},
};
use chrono::{Days, NaiveDate};
use mockable::Clock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use thiserror::Error;

/// Days of history included in the trend and per-user activity windows.
const WINDOW_DAYS: u64 = 30;

/// Number of recent activities included in a report.
const RECENT_ACTIVITY_LIMIT: i64 = 20;

/// Analytics request parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalyticsQuery {
    /// Board to analyse; defaults to the earliest-created board.
    pub board_id: Option<BoardId>,
    /// Sprint whose creation-date window to total separately.
    pub sprint_id: Option<SprintId>,
    /// Restrict overview and priority figures to tasks created on or after
    /// this date.
    pub start_date: Option<NaiveDate>,
    /// Restrict overview and priority figures to tasks created on or
    /// before this date.
    pub end_date: Option<NaiveDate>,
}

/// Service-level errors for analytics.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The requested sprint does not exist.
    #[error("sprint not found: {0}")]
    SprintNotFound(SprintId),

    /// Task lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Board lookup failed.
    #[error(transparent)]
    Boards(#[from] BoardRepositoryError),

    /// Activity lookup failed.
    #[error(transparent)]
    Activities(#[from] ActivityRepositoryError),

    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),

    /// Sprint lookup failed.
    #[error(transparent)]
    Sprints(#[from] SprintRepositoryError),
}

impl AnalyticsError {
    /// Classifies the error for boundary mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::SprintNotFound(_) => ErrorKind::NotFound,
            Self::Tasks(_)
            | Self::Boards(_)
            | Self::Activities(_)
            | Self::Users(_)
            | Self::Sprints(_) => ErrorKind::Operation,
        }
    }
}

/// Result type for analytics operations.
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Read-only rollup service over the tracker stores.
#[derive(Clone)]
pub struct AnalyticsService {
    tasks: Arc<dyn TaskRepository>,
    boards: Arc<dyn BoardRepository>,
    activities: Arc<dyn ActivityRepository>,
    users: Arc<dyn UserRepository>,
    sprints: Arc<dyn SprintRepository>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl AnalyticsService {
    /// Creates an analytics service.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        boards: Arc<dyn BoardRepository>,
        activities: Arc<dyn ActivityRepository>,
        users: Arc<dyn UserRepository>,
        sprints: Arc<dyn SprintRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            tasks,
            boards,
            activities,
            users,
            sprints,
            clock,
        }
    }

    /// Computes the full rollup for the requested board.
    ///
    /// When no board is named, the earliest-created board is used; when no
    /// board exists at all, the board-scoped sections are empty while the
    /// board-independent sections (user activity, recent activities) are
    /// still computed.
    ///
    /// # Errors
    ///
    /// Returns [`AnalyticsError::SprintNotFound`] when a requested sprint
    /// is absent, or an operation error when a store read fails.
    pub async fn report(&self, query: AnalyticsQuery) -> AnalyticsResult<AnalyticsReport> {
        let board_id = match query.board_id {
            Some(id) => Some(id),
            None => self.boards.first_board().await?.map(|board| board.id()),
        };

        let tasks = match board_id {
            Some(id) => self.tasks.list_by_board(id, None).await?,
            None => Vec::new(),
        };

        let today = self.clock.utc().date_naive();
        let window_start = today
            .checked_sub_days(Days::new(WINDOW_DAYS))
            .unwrap_or(today);

        let scoped: Vec<&Task> = tasks
            .iter()
            .filter(|task| {
                let created = task.created_at().date_naive();
                query.start_date.is_none_or(|start| created >= start)
                    && query.end_date.is_none_or(|end| created <= end)
            })
            .collect();

        let overview = Self::overview(&scoped);
        let task_trend = Self::trend(&tasks, window_start);
        let user_activity = self.user_activity(window_start).await?;
        let priority_distribution = Self::priority_distribution(&scoped);
        let recent_activities = self.recent_activities().await?;

        let sprint_analytics = match query.sprint_id {
            Some(sprint_id) => Some(self.sprint_totals(sprint_id).await?),
            None => None,
        };

        Ok(AnalyticsReport {
            overview,
            task_trend,
            user_activity,
            priority_distribution,
            recent_activities,
            sprint_analytics,
        })
    }

    /// One-pass status and story point rollup.
    fn overview(tasks: &[&Task]) -> Overview {
        if tasks.is_empty() {
            return Overview::empty();
        }

        let mut todo = 0_i64;
        let mut in_progress = 0_i64;
        let mut done = 0_i64;
        let mut total_points = 0_i64;
        let mut done_points = 0_i64;

        for task in tasks {
            let points = i64::from(task.story_points().value());
            total_points += points;
            match task.status() {
                TaskStatus::Todo => todo += 1,
                TaskStatus::InProgress => in_progress += 1,
                TaskStatus::Done => {
                    done += 1;
                    done_points += points;
                }
            }
        }

        let total = tasks.len() as i64;
        Overview {
            total_tasks: total,
            todo_tasks: todo,
            in_progress_tasks: in_progress,
            completed_tasks: done,
            completion_rate: completion_rate(done, total),
            total_story_points: total_points,
            completed_story_points: done_points,
            story_points_completion_rate: completion_rate(done_points, total_points),
            avg_story_points: total_points as f64 / total as f64,
        }
    }

    /// Creation/completion counts bucketed by creation date, newest first.
    fn trend(tasks: &[Task], window_start: NaiveDate) -> Vec<TrendPoint> {
        let mut buckets: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
        for task in tasks {
            let date = task.created_at().date_naive();
            if date < window_start {
                continue;
            }
            let bucket = buckets.entry(date).or_default();
            bucket.0 += 1;
            if task.status() == TaskStatus::Done {
                bucket.1 += 1;
            }
        }
        buckets
            .into_iter()
            .rev()
            .map(|(date, (created, completed))| TrendPoint {
                date,
                tasks_created: created,
                tasks_completed: completed,
            })
            .collect()
    }

    /// Task activity per user over the trailing window, busiest first.
    ///
    /// Every known user appears, including users with no activity; the
    /// username is the deterministic tiebreak.
    async fn user_activity(
        &self,
        window_start: NaiveDate,
    ) -> AnalyticsResult<Vec<UserActivitySummary>> {
        let since = window_start
            .and_hms_opt(0, 0, 0)
            .map(|naive| naive.and_utc());
        let mut filter = ActivityFilter::new().with_entity_type(Activity::TASK_ENTITY);
        if let Some(cutoff) = since {
            filter = filter.with_since(cutoff);
        }
        let activities = self.activities.list(&filter).await?;

        let mut counts: HashMap<UserId, (i64, i64, i64)> = HashMap::new();
        for activity in &activities {
            let Some(user_id) = activity.user_id() else {
                continue;
            };
            let entry = counts.entry(user_id).or_default();
            entry.0 += 1;
            match activity.action().as_str() {
                "created" => entry.1 += 1,
                "updated" => entry.2 += 1,
                _ => {}
            }
        }

        let mut summaries: Vec<UserActivitySummary> = self
            .users
            .list()
            .await?
            .into_iter()
            .map(|user| {
                let (total, created, updated) =
                    counts.get(&user.id).copied().unwrap_or_default();
                UserActivitySummary {
                    username: user.username,
                    activity_count: total,
                    tasks_created: created,
                    tasks_updated: updated,
                }
            })
            .collect();

        summaries.sort_by(|a, b| {
            b.activity_count
                .cmp(&a.activity_count)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(summaries)
    }

    /// Counts per priority; empty buckets are omitted, remaining buckets
    /// appear in ascending urgency order.
    fn priority_distribution(tasks: &[&Task]) -> Vec<PriorityBucket> {
        let mut buckets: HashMap<TaskPriority, (i64, i64)> = HashMap::new();
        for task in tasks {
            let entry = buckets.entry(task.priority()).or_default();
            entry.0 += 1;
            if task.status() == TaskStatus::Done {
                entry.1 += 1;
            }
        }

        TaskPriority::ALL
            .into_iter()
            .filter_map(|priority| {
                buckets.get(&priority).map(|&(count, completed)| PriorityBucket {
                    priority,
                    count,
                    completed_count: completed,
                    completion_rate: completion_rate(completed, count),
                })
            })
            .collect()
    }

    async fn recent_activities(&self) -> AnalyticsResult<Vec<ActivityView>> {
        let filter = ActivityFilter::new().with_limit(RECENT_ACTIVITY_LIMIT);
        let activities = self.activities.list(&filter).await?;

        let user_ids: Vec<UserId> = activities.iter().filter_map(Activity::user_id).collect();
        let users = self.users.find_by_ids(&user_ids).await?;
        let by_id: HashMap<UserId, UserDisplay> = users
            .into_iter()
            .map(|user| (user.id, user.display()))
            .collect();

        Ok(activities
            .iter()
            .map(|activity| {
                let user = activity.user_id().and_then(|id| by_id.get(&id).cloned());
                ActivityView::from_activity(activity, user)
            })
            .collect())
    }

    /// Totals over tasks created within the sprint's date window.
    async fn sprint_totals(&self, sprint_id: SprintId) -> AnalyticsResult<SprintTotals> {
        let sprint = self
            .sprints
            .find_by_id(sprint_id)
            .await?
            .ok_or(AnalyticsError::SprintNotFound(sprint_id))?;

        let tasks = self.tasks.list_by_board(sprint.board_id, None).await?;
        let mut totals = SprintTotals {
            total_tasks: 0,
            completed_tasks: 0,
            total_story_points: 0,
            completed_story_points: 0,
        };
        for task in &tasks {
            if !sprint.contains(task.created_at().date_naive()) {
                continue;
            }
            let points = i64::from(task.story_points().value());
            totals.total_tasks += 1;
            totals.total_story_points += points;
            if task.status() == TaskStatus::Done {
                totals.completed_tasks += 1;
                totals.completed_story_points += points;
            }
        }
        Ok(totals)
    }
}
