//! Outbound contract the dashboard uses to reach the server.

use crate::tracker::domain::{TaskId, TaskPatch, TaskStatus};
use crate::tracker::services::{ActivityView, TaskView};
use async_trait::async_trait;
use thiserror::Error;

/// Failures reaching or reading the server.
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// The request never completed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned status {0}")]
    Status(u16),
}

/// Result type for backend client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Server-side operations available to the dashboard.
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Fetches all tasks visible to the client.
    async fn fetch_tasks(&self) -> ClientResult<Vec<TaskView>>;

    /// Fetches the recent activity feed.
    async fn fetch_activities(&self) -> ClientResult<Vec<ActivityView>>;

    /// Creates a task with the given title and initial status.
    async fn create_task(&self, title: &str, status: TaskStatus) -> ClientResult<TaskView>;

    /// Applies a partial update and returns the server's updated view.
    async fn update_task(&self, id: TaskId, patch: TaskPatch) -> ClientResult<TaskView>;

    /// Deletes a task.
    async fn delete_task(&self, id: TaskId) -> ClientResult<()>;

    /// Summarizes free-form task text.
    async fn summarize(&self, text: &str) -> ClientResult<String>;
}
