//! Task mutation service: CRUD with partial updates and a coupled audit
//! trail.
//!
//! Every successful mutation appends exactly one activity entry. The
//! mutation and its audit write are one composed operation: when the audit
//! append fails the whole call fails, so a state change never goes
//! unaudited from the caller's perspective.

use super::ErrorKind;
use crate::tracker::{
    domain::{
        Activity, ActivityAction, BoardId, NewTask, StoryPoints, Task, TaskChangeDetails, TaskId,
        TaskPatch, TaskPriority, TaskStatus, TaskTitle, TrackerDomainError, UserDisplay, UserId,
    },
    ports::{
        ActivityRepository, ActivityRepositoryError, BoardRepository, BoardRepositoryError,
        TaskRepository, TaskRepositoryError, UserRepository, UserRepositoryError,
    },
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    board_id: BoardId,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    story_points: i32,
    assignee_id: Option<UserId>,
    due_date: Option<NaiveDate>,
    created_by: UserId,
}

impl CreateTaskRequest {
    /// Creates a request with creation defaults (`todo`, `medium`, one
    /// story point, unassigned).
    #[must_use]
    pub fn new(board_id: BoardId, title: impl Into<String>, created_by: UserId) -> Self {
        Self {
            board_id,
            title: title.into(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            story_points: 1,
            assignee_id: None,
            due_date: None,
            created_by,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the initial priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the story point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, story_points: i32) -> Self {
        self.story_points = story_points;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: UserId) -> Self {
        self.assignee_id = Some(assignee_id);
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Task joined with its assignee display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    pub title: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Priority.
    pub priority: TaskPriority,
    /// Story point estimate.
    pub story_points: i32,
    /// Due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Resolved assignee display fields, if assigned.
    pub assignee: Option<UserDisplay>,
}

impl TaskView {
    /// Builds a view from a task and its resolved assignee.
    #[must_use]
    pub fn from_task(task: &Task, assignee: Option<UserDisplay>) -> Self {
        Self {
            id: task.id(),
            title: task.title().as_str().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            priority: task.priority(),
            story_points: task.story_points().value(),
            due_date: task.due_date(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
            assignee,
        }
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TrackerDomainError),

    /// An update request supplied no recognised fields.
    #[error("no valid fields to update")]
    EmptyUpdate,

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The referenced board does not exist.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The referenced assignee does not exist.
    #[error("assignee not found: {0}")]
    AssigneeNotFound(UserId),

    /// The audit append failed after the mutation; the request is reported
    /// as failed so the change never appears committed without its audit
    /// entry.
    #[error("audit write failed: {0}")]
    Audit(#[from] ActivityRepositoryError),

    /// Task persistence failed.
    #[error(transparent)]
    Tasks(TaskRepositoryError),

    /// Board lookup failed.
    #[error(transparent)]
    Boards(#[from] BoardRepositoryError),

    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),
}

impl TaskServiceError {
    /// Classifies the error for boundary mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) | Self::EmptyUpdate => ErrorKind::Validation,
            Self::TaskNotFound(_) | Self::BoardNotFound(_) | Self::AssigneeNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::Audit(_) | Self::Tasks(_) | Self::Boards(_) | Self::Users(_) => {
                ErrorKind::Operation
            }
        }
    }
}

impl From<TaskRepositoryError> for TaskServiceError {
    fn from(err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Tasks(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task mutation and lookup service.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskRepository>,
    boards: Arc<dyn BoardRepository>,
    activities: Arc<dyn ActivityRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock + Send + Sync>,
    default_actor: Option<UserId>,
}

impl TaskService {
    /// Creates a task service.
    ///
    /// `default_actor` is attributed to audit entries on mutation paths
    /// that carry no explicit actor.
    #[must_use]
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        boards: Arc<dyn BoardRepository>,
        activities: Arc<dyn ActivityRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
        default_actor: Option<UserId>,
    ) -> Self {
        Self {
            tasks,
            boards,
            activities,
            users,
            clock,
            default_actor,
        }
    }

    /// Creates a task, audits the creation, and resolves the assignee
    /// display fields.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty title or non-positive story
    /// points, a not-found error for an absent board or assignee, and an
    /// operation error when persistence or the audit append fails.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskServiceResult<TaskView> {
        let title = TaskTitle::new(request.title)?;
        let story_points = StoryPoints::new(request.story_points)?;

        self.boards
            .find_by_id(request.board_id)
            .await?
            .ok_or(TaskServiceError::BoardNotFound(request.board_id))?;

        let assignee = match request.assignee_id {
            Some(user_id) => Some(
                self.users
                    .find_by_id(user_id)
                    .await?
                    .ok_or(TaskServiceError::AssigneeNotFound(user_id))?,
            ),
            None => None,
        };

        let mut spec = NewTask::new(request.board_id, title, request.created_by);
        spec.description = request.description;
        spec.status = request.status;
        spec.priority = request.priority;
        spec.story_points = story_points;
        spec.assignee_id = request.assignee_id;
        spec.due_date = request.due_date;

        let task = Task::create(spec, &*self.clock);
        self.tasks.insert(&task).await?;

        self.audit(
            ActivityAction::CREATED,
            &task,
            Some(request.created_by),
            TaskChangeDetails::title_only(task.title().as_str()),
        )
        .await?;

        Ok(TaskView::from_task(
            &task,
            assignee.map(|user| user.display()),
        ))
    }

    /// Fetches one task joined with its assignee display fields.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when no task matches, or
    /// an operation error when the store fails.
    pub async fn get(&self, id: TaskId) -> TaskServiceResult<TaskView> {
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        let assignee = self.resolve_assignee(&task).await?;
        Ok(TaskView::from_task(&task, assignee))
    }

    /// Applies a partial update and audits the change.
    ///
    /// `updated_at` is refreshed on every successful call, including no-op
    /// field sets. At most one activity is recorded: a status transition
    /// entry when `status` changed, a title-only entry when any other field
    /// changed, and none when nothing changed value.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::EmptyUpdate`] when no recognised field
    /// is supplied, [`TaskServiceError::TaskNotFound`] when the task is
    /// absent, and an operation error when persistence or the audit append
    /// fails.
    pub async fn update(
        &self,
        id: TaskId,
        patch: TaskPatch,
        actor: Option<UserId>,
    ) -> TaskServiceResult<TaskView> {
        if patch.is_empty() {
            return Err(TaskServiceError::EmptyUpdate);
        }

        let mut task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        let outcome = task.apply(patch, &*self.clock);
        self.tasks.update(&task).await?;

        let actor = actor.or(self.default_actor);
        if let Some((from, to)) = outcome.status_change {
            self.audit(
                ActivityAction::UPDATED,
                &task,
                actor,
                TaskChangeDetails::status_change(
                    task.title().as_str(),
                    from.as_str(),
                    to.as_str(),
                ),
            )
            .await?;
        } else if outcome.field_changed {
            self.audit(
                ActivityAction::UPDATED,
                &task,
                actor,
                TaskChangeDetails::title_only(task.title().as_str()),
            )
            .await?;
        }

        let assignee = self.resolve_assignee(&task).await?;
        Ok(TaskView::from_task(&task, assignee))
    }

    /// Deletes a task and audits the deletion with the pre-delete title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::TaskNotFound`] when the task is absent,
    /// and an operation error when persistence or the audit append fails.
    pub async fn delete(&self, id: TaskId, actor: Option<UserId>) -> TaskServiceResult<()> {
        // The title must be captured before the row is gone.
        let task = self
            .tasks
            .find_by_id(id)
            .await?
            .ok_or(TaskServiceError::TaskNotFound(id))?;

        self.tasks.delete(id).await?;

        self.audit(
            ActivityAction::DELETED,
            &task,
            actor.or(self.default_actor),
            TaskChangeDetails::title_only(task.title().as_str()),
        )
        .await?;

        Ok(())
    }

    /// Lists a board's tasks, newest-first, optionally filtered by status,
    /// each joined with assignee display fields.
    ///
    /// # Errors
    ///
    /// Returns an operation error when the store fails.
    pub async fn list_by_board(
        &self,
        board_id: BoardId,
        status: Option<TaskStatus>,
    ) -> TaskServiceResult<Vec<TaskView>> {
        let tasks = self.tasks.list_by_board(board_id, status).await?;

        let assignee_ids: Vec<UserId> = tasks.iter().filter_map(Task::assignee_id).collect();
        let users = self.users.find_by_ids(&assignee_ids).await?;
        let by_id: HashMap<UserId, UserDisplay> = users
            .into_iter()
            .map(|user| (user.id, user.display()))
            .collect();

        Ok(tasks
            .iter()
            .map(|task| {
                let assignee = task.assignee_id().and_then(|id| by_id.get(&id).cloned());
                TaskView::from_task(task, assignee)
            })
            .collect())
    }

    async fn resolve_assignee(&self, task: &Task) -> TaskServiceResult<Option<UserDisplay>> {
        match task.assignee_id() {
            Some(user_id) => Ok(self
                .users
                .find_by_id(user_id)
                .await?
                .map(|user| user.display())),
            None => Ok(None),
        }
    }

    async fn audit(
        &self,
        action: ActivityAction,
        task: &Task,
        actor: Option<UserId>,
        details: TaskChangeDetails,
    ) -> TaskServiceResult<()> {
        let activity = Activity::record(
            action,
            Activity::TASK_ENTITY,
            task.id().into_inner(),
            actor,
            details.into_value(),
            &*self.clock,
        )?;
        self.activities.append(&activity).await?;
        Ok(())
    }
}
