//! Domain model for the task tracker.
//!
//! Boards own tasks; every mutation is audited as an append-only activity;
//! sprints are date windows used by analytics. All infrastructure concerns
//! stay outside the domain boundary.

mod activity;
mod board;
mod error;
mod ids;
mod sprint;
mod task;
mod user;

pub use activity::{
    Activity, ActivityAction, KnownAction, PersistedActivityData, TaskChangeDetails,
};
pub use board::{Board, BoardName, PersistedBoardData};
pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TrackerDomainError};
pub use ids::{ActivityId, BoardId, SprintId, TaskId, UserId};
pub use sprint::Sprint;
pub use task::{
    NewTask, Patch, PatchOutcome, PersistedTaskData, StoryPoints, Task, TaskPatch, TaskPriority,
    TaskStatus, TaskTitle,
};
pub use user::{User, UserDisplay};
