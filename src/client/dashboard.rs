//! In-memory dashboard state reconciled against the server.
//!
//! The dashboard runs on a single logical thread of control: operations
//! are never concurrent with each other from the same client. A network
//! failure never empties the view; each operation degrades according to
//! its [`ReconcilePolicy`].

use super::placeholder::{placeholder_activities, placeholder_tasks};
use super::policy::{DashboardOp, ReconcilePolicy};
use super::ports::{BackendClient, ClientError, ClientResult};
use crate::tracker::domain::{Patch, TaskId, TaskPatch, TaskPriority, TaskStatus};
use crate::tracker::services::{ActivityView, TaskView};
use mockable::Clock;
use std::sync::Arc;

/// Outcome of the delete confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteDecision {
    /// The user confirmed the delete.
    Confirmed,
    /// The user cancelled; nothing is sent.
    Cancelled,
}

/// Client-side task board state.
pub struct Dashboard {
    backend: Arc<dyn BackendClient>,
    clock: Arc<dyn Clock + Send + Sync>,
    tasks: Vec<TaskView>,
    activities: Vec<ActivityView>,
    error: Option<String>,
}

impl Dashboard {
    /// Creates an empty dashboard over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn BackendClient>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            backend,
            clock,
            tasks: Vec::new(),
            activities: Vec::new(),
            error: None,
        }
    }

    /// Current task list.
    #[must_use]
    pub fn tasks(&self) -> &[TaskView] {
        &self.tasks
    }

    /// Current activity feed.
    #[must_use]
    pub fn activities(&self) -> &[ActivityView] {
        &self.activities
    }

    /// Current user-visible error flag, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Clears the error flag.
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Tasks in the given status column, in local order.
    pub fn tasks_by_status(&self, status: TaskStatus) -> Vec<&TaskView> {
        self.tasks
            .iter()
            .filter(|task| task.status == status)
            .collect()
    }

    /// Fetches tasks and activities from the server.
    ///
    /// On failure the view is populated with the fixed placeholder data
    /// set instead of being left empty, and the error flag is raised.
    pub async fn load(&mut self) {
        match self.backend.fetch_tasks().await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.error = None;
            }
            Err(error) => {
                self.reconcile_failure(DashboardOp::Load, "Failed to load tasks", &error);
                self.tasks = placeholder_tasks();
            }
        }

        match self.backend.fetch_activities().await {
            Ok(activities) => self.activities = activities,
            Err(error) => {
                tracing::warn!(%error, "failed to load activities, using placeholders");
                self.activities = placeholder_activities();
            }
        }
    }

    /// Creates a task on the server and appends it to local state.
    ///
    /// Nothing is shown until the server responds. On failure the error
    /// flag is raised and a locally synthesized task with a temporary
    /// client-generated id is appended so the board stays usable offline.
    pub async fn add_task(&mut self, title: &str, status: TaskStatus) {
        let title = title.trim();
        if title.is_empty() {
            return;
        }

        match self.backend.create_task(title, status).await {
            Ok(task) => {
                self.tasks.push(task);
                self.refresh_activities().await;
            }
            Err(error) => {
                self.reconcile_failure(DashboardOp::Add, "Failed to add task", &error);
                let now = self.clock.utc();
                self.tasks.push(TaskView {
                    id: TaskId::new(),
                    title: title.to_owned(),
                    description: None,
                    status,
                    priority: TaskPriority::Medium,
                    story_points: 1,
                    due_date: None,
                    created_at: now,
                    updated_at: now,
                    assignee: None,
                });
            }
        }
    }

    /// Moves a task to a new status column.
    ///
    /// The local status change is kept whether or not the server write
    /// succeeds. A failed round trip is only logged: the client trusts its
    /// own optimistic edit over the failure.
    pub async fn move_task(&mut self, id: TaskId, new_status: TaskStatus) {
        let patch = TaskPatch::new().with_status(new_status);
        match self.backend.update_task(id, patch).await {
            Ok(_) => {
                self.set_local_status(id, new_status);
                self.refresh_activities().await;
            }
            Err(error) => {
                self.reconcile_failure(DashboardOp::Move, "Failed to move task", &error);
                self.set_local_status(id, new_status);
            }
        }
    }

    /// Applies a field edit.
    ///
    /// On success the local task is replaced with the server's view. On
    /// failure the attempted fields are merged into the local copy anyway
    /// and the error flag is raised: local state always reflects the
    /// user's last intent. Returns the resulting local view, or `None`
    /// when the task is unknown locally after a failed round trip.
    pub async fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> Option<TaskView> {
        match self.backend.update_task(id, patch.clone()).await {
            Ok(updated) => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                    *task = updated.clone();
                }
                self.refresh_activities().await;
                Some(updated)
            }
            Err(error) => {
                self.reconcile_failure(DashboardOp::Update, "Failed to update task", &error);
                let task = self.tasks.iter_mut().find(|task| task.id == id)?;
                merge_patch(task, &patch);
                Some(task.clone())
            }
        }
    }

    /// Deletes a task after explicit confirmation.
    ///
    /// A cancelled decision sends nothing and returns `false`. On failure
    /// local state is left untouched and the failure is returned to the
    /// caller; delete never removes optimistically.
    ///
    /// # Errors
    ///
    /// Returns the client error when the server delete fails.
    pub async fn delete_task(
        &mut self,
        id: TaskId,
        decision: DeleteDecision,
    ) -> ClientResult<bool> {
        if decision == DeleteDecision::Cancelled {
            return Ok(false);
        }

        match self.backend.delete_task(id).await {
            Ok(()) => {
                self.tasks.retain(|task| task.id != id);
                self.refresh_activities().await;
                Ok(true)
            }
            Err(error) => {
                self.reconcile_failure(DashboardOp::Delete, "Failed to delete task", &error);
                Err(error)
            }
        }
    }

    /// Summarizes task text, degrading to a canned message on failure.
    pub async fn summarize(&self, text: &str) -> String {
        match self.backend.summarize(text).await {
            Ok(summary) => summary,
            Err(error) => {
                tracing::warn!(%error, "summarize request failed");
                "Failed to generate summary. Please try again later.".to_owned()
            }
        }
    }

    async fn refresh_activities(&mut self) {
        match self.backend.fetch_activities().await {
            Ok(activities) => self.activities = activities,
            Err(error) => {
                // A stale feed beats replacing good data after a mutation.
                tracing::warn!(%error, "failed to refresh activities");
            }
        }
    }

    fn set_local_status(&mut self, id: TaskId, status: TaskStatus) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.status = status;
        }
    }

    fn reconcile_failure(&mut self, op: DashboardOp, message: &str, error: &ClientError) {
        tracing::warn!(%error, "{message}");
        match op.policy() {
            ReconcilePolicy::FlagAndSynthesize | ReconcilePolicy::StrictConfirm => {
                self.error = Some(message.to_owned());
            }
            ReconcilePolicy::KeepLocalSilently => {}
        }
    }
}

/// Merges the attempted patch fields into a local view.
///
/// An assignee id cannot be resolved to display fields offline, so that
/// field keeps its last known value.
fn merge_patch(view: &mut TaskView, patch: &TaskPatch) {
    if let Patch::Set(title) = &patch.title {
        view.title = title.as_str().to_owned();
    }
    if let Patch::Set(description) = &patch.description {
        view.description = description.clone();
    }
    if let Patch::Set(status) = patch.status {
        view.status = status;
    }
    if let Patch::Set(priority) = patch.priority {
        view.priority = priority;
    }
    if let Patch::Set(story_points) = patch.story_points {
        view.story_points = story_points.value();
    }
    if let Patch::Set(due_date) = patch.due_date {
        view.due_date = due_date;
    }
}
