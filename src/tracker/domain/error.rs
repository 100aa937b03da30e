//! Error types for tracker domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing domain tracker values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The board name is empty after trimming.
    #[error("board name must not be empty")]
    EmptyBoardName,

    /// The story point estimate is not a positive integer.
    #[error("invalid story points {0}, expected a positive integer")]
    InvalidStoryPoints(i32),

    /// The activity action value is empty.
    #[error("activity action must not be empty")]
    EmptyActivityAction,

    /// The activity entity type value is empty.
    #[error("activity entity type must not be empty")]
    EmptyEntityType,
}

/// Error returned while parsing task statuses from untrusted input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);

/// Error returned while parsing task priorities from untrusted input.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task priority: {0}")]
pub struct ParseTaskPriorityError(pub String);
