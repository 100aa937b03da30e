//! Task aggregate root, lifecycle enumerations, and partial-update types.

use super::{
    BoardId, ParseTaskPriorityError, ParseTaskStatusError, TaskId, TrackerDomainError, UserId,
};
use chrono::{DateTime, NaiveDate, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Work has not started.
    Todo,
    /// Work is underway.
    InProgress,
    /// Work is finished.
    Done,
}

impl TaskStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Done => "done",
        }
    }

    /// All statuses in workflow order.
    pub const ALL: [Self; 3] = [Self::Todo, Self::InProgress, Self::Done];
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "todo" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low urgency.
    Low,
    /// Default urgency.
    Medium,
    /// High urgency.
    High,
}

impl TaskPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// All priorities in ascending urgency order.
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseTaskPriorityError(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated, trimmed, non-empty task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::EmptyTaskTitle`] when the value is
    /// empty or whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, TrackerDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(TrackerDomainError::EmptyTaskTitle);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the title as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Positive story point estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryPoints(i32);

impl StoryPoints {
    /// One story point, the creation default.
    pub const ONE: Self = Self(1);

    /// Creates a validated story point value.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerDomainError::InvalidStoryPoints`] when the value is
    /// zero or negative.
    pub const fn new(value: i32) -> Result<Self, TrackerDomainError> {
        if value <= 0 {
            return Err(TrackerDomainError::InvalidStoryPoints(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for StoryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    board_id: BoardId,
    title: TaskTitle,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    story_points: StoryPoints,
    assignee_id: Option<UserId>,
    created_by: UserId,
    due_date: Option<NaiveDate>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for creating a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Owning board.
    pub board_id: BoardId,
    /// Validated title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Initial workflow status.
    pub status: TaskStatus,
    /// Initial priority.
    pub priority: TaskPriority,
    /// Story point estimate.
    pub story_points: StoryPoints,
    /// Optional assignee.
    pub assignee_id: Option<UserId>,
    /// Creating user.
    pub created_by: UserId,
    /// Optional due date.
    pub due_date: Option<NaiveDate>,
}

impl NewTask {
    /// Creates a new-task parameter object with creation defaults
    /// (`todo`, `medium`, one story point, unassigned, no due date).
    #[must_use]
    pub const fn new(board_id: BoardId, title: TaskTitle, created_by: UserId) -> Self {
        Self {
            board_id,
            title,
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            story_points: StoryPoints::ONE,
            assignee_id: None,
            created_by,
            due_date: None,
        }
    }
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted owning board.
    pub board_id: BoardId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description, if any.
    pub description: Option<String>,
    /// Persisted workflow status.
    pub status: TaskStatus,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted story point estimate.
    pub story_points: StoryPoints,
    /// Persisted assignee, if any.
    pub assignee_id: Option<UserId>,
    /// Persisted creating user.
    pub created_by: UserId,
    /// Persisted due date, if any.
    pub due_date: Option<NaiveDate>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task aggregate.
    #[must_use]
    pub fn create(spec: NewTask, clock: &dyn Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            board_id: spec.board_id,
            title: spec.title,
            description: spec.description,
            status: spec.status,
            priority: spec.priority,
            story_points: spec.story_points,
            assignee_id: spec.assignee_id,
            created_by: spec.created_by,
            due_date: spec.due_date,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            board_id: data.board_id,
            title: data.title,
            description: data.description,
            status: data.status,
            priority: data.priority,
            story_points: data.story_points,
            assignee_id: data.assignee_id,
            created_by: data.created_by,
            due_date: data.due_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning board identifier.
    #[must_use]
    pub const fn board_id(&self) -> BoardId {
        self.board_id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the workflow status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the story point estimate.
    #[must_use]
    pub const fn story_points(&self) -> StoryPoints {
        self.story_points
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub const fn assignee_id(&self) -> Option<UserId> {
        self.assignee_id
    }

    /// Returns the creating user.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update and refreshes `updated_at`.
    ///
    /// Only fields marked [`Patch::Set`] are written. `updated_at` is
    /// refreshed even when every supplied value equals the current one;
    /// the returned outcome reports the real deltas so callers can decide
    /// whether an audit entry is warranted.
    pub fn apply(&mut self, patch: TaskPatch, clock: &dyn Clock) -> PatchOutcome {
        let mut outcome = PatchOutcome::default();

        if let Patch::Set(title) = patch.title {
            if title != self.title {
                self.title = title;
                outcome.field_changed = true;
            }
        }
        if let Patch::Set(description) = patch.description {
            if description != self.description {
                self.description = description;
                outcome.field_changed = true;
            }
        }
        if let Patch::Set(status) = patch.status {
            if status != self.status {
                outcome.status_change = Some((self.status, status));
                self.status = status;
            }
        }
        if let Patch::Set(priority) = patch.priority {
            if priority != self.priority {
                self.priority = priority;
                outcome.field_changed = true;
            }
        }
        if let Patch::Set(story_points) = patch.story_points {
            if story_points != self.story_points {
                self.story_points = story_points;
                outcome.field_changed = true;
            }
        }
        if let Patch::Set(assignee_id) = patch.assignee_id {
            if assignee_id != self.assignee_id {
                self.assignee_id = assignee_id;
                outcome.field_changed = true;
            }
        }
        if let Patch::Set(due_date) = patch.due_date {
            if due_date != self.due_date {
                self.due_date = due_date;
                outcome.field_changed = true;
            }
        }

        self.touch(clock);
        outcome
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &dyn Clock) {
        self.updated_at = clock.utc();
    }
}

/// Presence indicator for a partial-update field.
///
/// An absent field is [`Patch::Keep`]; a field explicitly supplied, even as
/// null, is [`Patch::Set`]. Nullable task fields therefore use
/// `Patch<Option<T>>` so that `Set(None)` clears them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not supplied; keep the current value.
    Keep,
    /// The field was supplied; write this value.
    Set(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Keep
    }
}

impl<T> Patch<T> {
    /// Returns `true` when the field was supplied.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }
}

/// Partial update over the mutable task fields.
///
/// Presence, not value-nullness, decides whether a field is written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TaskPatch {
    /// New title.
    pub title: Patch<TaskTitle>,
    /// New description; `Set(None)` clears it.
    pub description: Patch<Option<String>>,
    /// New workflow status.
    pub status: Patch<TaskStatus>,
    /// New priority.
    pub priority: Patch<TaskPriority>,
    /// New story point estimate.
    pub story_points: Patch<StoryPoints>,
    /// New assignee; `Set(None)` unassigns.
    pub assignee_id: Patch<Option<UserId>>,
    /// New due date; `Set(None)` clears it.
    pub due_date: Patch<Option<NaiveDate>>,
}

impl TaskPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: TaskTitle) -> Self {
        self.title = Patch::Set(title);
        self
    }

    /// Sets or clears the description.
    #[must_use]
    pub fn with_description(mut self, description: Option<String>) -> Self {
        self.description = Patch::Set(description);
        self
    }

    /// Sets the workflow status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Patch::Set(status);
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Patch::Set(priority);
        self
    }

    /// Sets the story point estimate.
    #[must_use]
    pub const fn with_story_points(mut self, story_points: StoryPoints) -> Self {
        self.story_points = Patch::Set(story_points);
        self
    }

    /// Sets or clears the assignee.
    #[must_use]
    pub const fn with_assignee(mut self, assignee_id: Option<UserId>) -> Self {
        self.assignee_id = Patch::Set(assignee_id);
        self
    }

    /// Sets or clears the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        self.due_date = Patch::Set(due_date);
        self
    }

    /// Returns `true` when no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        !(self.title.is_set()
            || self.description.is_set()
            || self.status.is_set()
            || self.priority.is_set()
            || self.story_points.is_set()
            || self.assignee_id.is_set()
            || self.due_date.is_set())
    }
}

/// Field deltas produced by applying a [`TaskPatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatchOutcome {
    /// A non-status field changed value.
    pub field_changed: bool,
    /// The status changed value, with the previous and new status.
    pub status_change: Option<(TaskStatus, TaskStatus)>,
}

impl PatchOutcome {
    /// Returns `true` when any field, status included, changed value.
    #[must_use]
    pub const fn any_change(&self) -> bool {
        self.field_changed || self.status_change.is_some()
    }
}
