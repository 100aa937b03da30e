//! In-memory store backing every tracker port.
//!
//! Used by the test suites and by offline wiring. One store implements all
//! repository ports so the services can share a single fixture.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::tracker::{
    domain::{Activity, Board, BoardId, Sprint, SprintId, Task, TaskId, TaskStatus, User, UserId},
    ports::{
        ActivityFilter, ActivityRepository, ActivityRepositoryError, ActivityRepositoryResult,
        BoardRepository, BoardRepositoryError, BoardRepositoryResult, SprintRepository,
        SprintRepositoryError, SprintRepositoryResult, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult, UserRepository, UserRepositoryError, UserRepositoryResult,
    },
};

/// Thread-safe in-memory tracker store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

#[derive(Debug, Default)]
struct StoreState {
    tasks: HashMap<TaskId, StoredTask>,
    boards: HashMap<BoardId, StoredBoard>,
    users: HashMap<UserId, User>,
    sprints: HashMap<SprintId, Sprint>,
    // Append order doubles as a tiebreak for equal timestamps.
    activities: Vec<Activity>,
    sequence: u64,
}

#[derive(Debug, Clone)]
struct StoredTask {
    seq: u64,
    task: Task,
}

#[derive(Debug, Clone)]
struct StoredBoard {
    seq: u64,
    board: Board,
}

impl StoreState {
    fn next_seq(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a user, replacing any existing record with the same id.
    ///
    /// # Panics
    ///
    /// Panics when the store lock is poisoned; seeding is test-only setup.
    pub fn seed_user(&self, user: User) {
        let mut state = self.state.write().expect("store lock poisoned");
        state.users.insert(user.id, user);
    }

    /// Seeds a board, replacing any existing record with the same id.
    ///
    /// # Panics
    ///
    /// Panics when the store lock is poisoned; seeding is test-only setup.
    pub fn seed_board(&self, board: Board) {
        let mut state = self.state.write().expect("store lock poisoned");
        let seq = state.next_seq();
        state.boards.insert(board.id(), StoredBoard { seq, board });
    }

    /// Seeds a sprint, replacing any existing record with the same id.
    ///
    /// # Panics
    ///
    /// Panics when the store lock is poisoned; seeding is test-only setup.
    pub fn seed_sprint(&self, sprint: Sprint) {
        let mut state = self.state.write().expect("store lock poisoned");
        state.sprints.insert(sprint.id, sprint);
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, StoreState>, std::io::Error> {
        self.state
            .read()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, StoreState>, std::io::Error> {
        self.state
            .write()
            .map_err(|err| std::io::Error::other(err.to_string()))
    }
}

#[async_trait]
impl TaskRepository for InMemoryStore {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let seq = state.next_seq();
        state.tasks.insert(
            task.id(),
            StoredTask {
                seq,
                task: task.clone(),
            },
        );
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        stored.task = task.clone();
        Ok(())
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.write().map_err(TaskRepositoryError::persistence)?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        Ok(state.tasks.get(&id).map(|stored| stored.task.clone()))
    }

    async fn list_by_board(
        &self,
        board_id: BoardId,
        status: Option<TaskStatus>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let mut matches: Vec<&StoredTask> = state
            .tasks
            .values()
            .filter(|stored| stored.task.board_id() == board_id)
            .filter(|stored| status.is_none_or(|wanted| stored.task.status() == wanted))
            .collect();
        matches.sort_by(|a, b| {
            b.task
                .created_at()
                .cmp(&a.task.created_at())
                .then(b.seq.cmp(&a.seq))
        });
        Ok(matches.into_iter().map(|stored| stored.task.clone()).collect())
    }

    async fn count_by_board(&self, board_id: BoardId) -> TaskRepositoryResult<i64> {
        let state = self.read().map_err(TaskRepositoryError::persistence)?;
        let count = state
            .tasks
            .values()
            .filter(|stored| stored.task.board_id() == board_id)
            .count();
        Ok(count as i64)
    }
}

#[async_trait]
impl BoardRepository for InMemoryStore {
    async fn insert(&self, board: &Board) -> BoardRepositoryResult<()> {
        let mut state = self.write().map_err(BoardRepositoryError::persistence)?;
        if state.boards.contains_key(&board.id()) {
            return Err(BoardRepositoryError::DuplicateBoard(board.id()));
        }
        let seq = state.next_seq();
        state.boards.insert(
            board.id(),
            StoredBoard {
                seq,
                board: board.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        let state = self.read().map_err(BoardRepositoryError::persistence)?;
        Ok(state.boards.get(&id).map(|stored| stored.board.clone()))
    }

    async fn list(&self) -> BoardRepositoryResult<Vec<Board>> {
        let state = self.read().map_err(BoardRepositoryError::persistence)?;
        let mut stored: Vec<&StoredBoard> = state.boards.values().collect();
        stored.sort_by(|a, b| {
            b.board
                .created_at()
                .cmp(&a.board.created_at())
                .then(b.seq.cmp(&a.seq))
        });
        Ok(stored.into_iter().map(|s| s.board.clone()).collect())
    }

    async fn first_board(&self) -> BoardRepositoryResult<Option<Board>> {
        let state = self.read().map_err(BoardRepositoryError::persistence)?;
        let first = state
            .boards
            .values()
            .min_by(|a, b| {
                a.board
                    .created_at()
                    .cmp(&b.board.created_at())
                    .then(a.seq.cmp(&b.seq))
            })
            .map(|stored| stored.board.clone());
        Ok(first)
    }
}

#[async_trait]
impl ActivityRepository for InMemoryStore {
    async fn append(&self, activity: &Activity) -> ActivityRepositoryResult<()> {
        let mut state = self.write().map_err(ActivityRepositoryError::persistence)?;
        state.activities.push(activity.clone());
        Ok(())
    }

    async fn list(&self, filter: &ActivityFilter) -> ActivityRepositoryResult<Vec<Activity>> {
        let state = self.read().map_err(ActivityRepositoryError::persistence)?;
        let mut matches: Vec<(usize, &Activity)> = state
            .activities
            .iter()
            .enumerate()
            .filter(|(_, activity)| {
                filter
                    .entity_type
                    .as_deref()
                    .is_none_or(|wanted| activity.entity_type() == wanted)
            })
            .filter(|(_, activity)| {
                filter
                    .entity_id
                    .is_none_or(|wanted| activity.entity_id() == wanted)
            })
            .filter(|(_, activity)| {
                filter
                    .since
                    .is_none_or(|cutoff| activity.created_at() >= cutoff)
            })
            .collect();
        matches.sort_by(|(a_idx, a), (b_idx, b)| {
            b.created_at()
                .cmp(&a.created_at())
                .then(b_idx.cmp(a_idx))
        });

        let offset = usize::try_from(filter.offset).unwrap_or(0);
        let page = matches.into_iter().skip(offset);
        let activities = match filter.limit {
            Some(limit) => page
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .map(|(_, activity)| activity.clone())
                .collect(),
            None => page.map(|(_, activity)| activity.clone()).collect(),
        };
        Ok(activities)
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> UserRepositoryResult<Vec<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        Ok(ids
            .iter()
            .filter_map(|id| state.users.get(id).cloned())
            .collect())
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        let state = self.read().map_err(UserRepositoryError::persistence)?;
        let mut users: Vec<User> = state.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }
}

#[async_trait]
impl SprintRepository for InMemoryStore {
    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>> {
        let state = self.read().map_err(SprintRepositoryError::persistence)?;
        Ok(state.sprints.get(&id).copied())
    }
}
