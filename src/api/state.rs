//! Shared handler state.

use crate::analytics::AnalyticsService;
use crate::summarize::SummarizeService;
use crate::tracker::domain::{BoardId, UserId};
use crate::tracker::ports::{BoardRepository, BoardRepositoryError};
use crate::tracker::services::{ActivityService, BoardService, TaskService};
use std::sync::Arc;

/// Services shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Task mutation and lookup service.
    pub tasks: TaskService,
    /// Board creation and listing service.
    pub boards: BoardService,
    /// Activity recording and lookup service.
    pub activities: ActivityService,
    /// Read-side analytics service.
    pub analytics: AnalyticsService,
    /// Summarization service.
    pub summarize: SummarizeService,
    /// Board lookup used to resolve the default board for requests that
    /// name none.
    pub board_directory: Arc<dyn BoardRepository>,
    /// Actor attributed to mutations that carry no explicit user.
    pub default_actor: Option<UserId>,
}

impl AppState {
    /// Resolves the earliest-created board as the default request target.
    ///
    /// # Errors
    ///
    /// Returns the repository error when the lookup fails.
    pub async fn default_board(&self) -> Result<Option<BoardId>, BoardRepositoryError> {
        Ok(self
            .board_directory
            .first_board()
            .await?
            .map(|board| board.id()))
    }
}
