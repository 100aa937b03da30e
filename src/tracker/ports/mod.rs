//! Port contracts for tracker persistence.

mod repository;

pub use repository::{
    ActivityFilter, ActivityRepository, ActivityRepositoryError, ActivityRepositoryResult,
    BoardRepository, BoardRepositoryError, BoardRepositoryResult, SprintRepository,
    SprintRepositoryError, SprintRepositoryResult, TaskRepository, TaskRepositoryError,
    TaskRepositoryResult, UserRepository, UserRepositoryError, UserRepositoryResult,
};
