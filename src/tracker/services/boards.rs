//! Board service: creation with audit, and listing with task counts.

use super::ErrorKind;
use crate::tracker::{
    domain::{
        Activity, ActivityAction, Board, BoardName, TrackerDomainError, UserId,
    },
    ports::{
        ActivityRepository, ActivityRepositoryError, BoardRepository, BoardRepositoryError,
        TaskRepository, TaskRepositoryError, UserRepository, UserRepositoryError,
    },
};
use crate::tracker::domain::BoardId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

/// Creator display fields embedded in board views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorDisplay {
    /// Login name of the creating user, or `"Unknown"` when the reference
    /// cannot be resolved.
    pub username: String,
}

/// Board joined with its creator and task count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    /// Board identifier.
    pub id: BoardId,
    /// Board name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: DateTime<Utc>,
    /// Creator display fields.
    pub created_by: CreatorDisplay,
    /// Number of tasks on the board.
    pub task_count: i64,
}

/// Service-level errors for board operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Validation(#[from] TrackerDomainError),

    /// Board persistence failed.
    #[error(transparent)]
    Boards(#[from] BoardRepositoryError),

    /// Task count lookup failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// User lookup failed.
    #[error(transparent)]
    Users(#[from] UserRepositoryError),

    /// The audit append failed after the mutation.
    #[error("audit write failed: {0}")]
    Audit(#[from] ActivityRepositoryError),
}

impl BoardServiceError {
    /// Classifies the error for boundary mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Boards(_) | Self::Tasks(_) | Self::Users(_) | Self::Audit(_) => {
                ErrorKind::Operation
            }
        }
    }
}

/// Result type for board service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;

/// Board creation and listing service.
#[derive(Clone)]
pub struct BoardService {
    boards: Arc<dyn BoardRepository>,
    tasks: Arc<dyn TaskRepository>,
    activities: Arc<dyn ActivityRepository>,
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl BoardService {
    /// Creates a board service.
    #[must_use]
    pub fn new(
        boards: Arc<dyn BoardRepository>,
        tasks: Arc<dyn TaskRepository>,
        activities: Arc<dyn ActivityRepository>,
        users: Arc<dyn UserRepository>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            boards,
            tasks,
            activities,
            users,
            clock,
        }
    }

    /// Creates a board and audits the creation.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty name and an operation error
    /// when persistence or the audit append fails.
    pub async fn create(
        &self,
        name: impl Into<String> + Send,
        description: impl Into<String> + Send,
        created_by: UserId,
    ) -> BoardServiceResult<BoardView> {
        let name = BoardName::new(name)?;
        let board = Board::create(name, description, created_by, &*self.clock);
        self.boards.insert(&board).await?;

        let activity = Activity::record(
            ActivityAction::CREATED,
            Activity::BOARD_ENTITY,
            board.id().into_inner(),
            Some(created_by),
            json!({ "name": board.name().as_str() }),
            &*self.clock,
        )?;
        self.activities.append(&activity).await?;

        let creator = self.creator_display(created_by).await?;
        Ok(Self::view(&board, creator, 0))
    }

    /// Lists all boards, newest-first, with creator names and task counts.
    ///
    /// # Errors
    ///
    /// Returns an operation error when the store fails.
    pub async fn list(&self) -> BoardServiceResult<Vec<BoardView>> {
        let boards = self.boards.list().await?;
        let mut views = Vec::with_capacity(boards.len());
        for board in &boards {
            let creator = self.creator_display(board.created_by()).await?;
            let task_count = self.tasks.count_by_board(board.id()).await?;
            views.push(Self::view(board, creator, task_count));
        }
        Ok(views)
    }

    async fn creator_display(&self, user_id: UserId) -> BoardServiceResult<CreatorDisplay> {
        let username = self
            .users
            .find_by_id(user_id)
            .await?
            .map_or_else(|| "Unknown".to_owned(), |user| user.username);
        Ok(CreatorDisplay { username })
    }

    fn view(board: &Board, created_by: CreatorDisplay, task_count: i64) -> BoardView {
        BoardView {
            id: board.id(),
            name: board.name().as_str().to_owned(),
            description: board.description().to_owned(),
            created_at: board.created_at(),
            updated_at: board.updated_at(),
            created_by,
            task_count,
        }
    }
}
