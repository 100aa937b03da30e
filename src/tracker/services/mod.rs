//! Orchestration services for tracker operations.

mod activities;
mod boards;
mod tasks;

pub use activities::{
    ActivityService, ActivityServiceError, ActivityServiceResult, ActivityView,
    RecordActivityRequest,
};
pub use boards::{BoardService, BoardServiceError, BoardServiceResult, BoardView, CreatorDisplay};
pub use tasks::{CreateTaskRequest, TaskService, TaskServiceError, TaskServiceResult, TaskView};

/// Coarse classification of service failures, mapped onto the HTTP
/// taxonomy by the API layer (validation 400, not-found 404, operation
/// failure 500).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input; never retried.
    Validation,
    /// A referenced entity is absent; terminal for the request.
    NotFound,
    /// Store or downstream failure; surfaced with a generic message.
    Operation,
}
