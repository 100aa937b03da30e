//! `PostgreSQL` repository implementation for the tracker ports.

use super::{
    models::{
        ActivityRow, BoardRow, NewActivityRow, NewBoardRow, NewTaskRow, SprintRow, TaskChangeset,
        TaskRow, UserRow,
    },
    schema::{activities, boards, sprints, tasks, users},
};
use crate::tracker::{
    domain::{
        Activity, ActivityAction, ActivityId, Board, BoardId, BoardName, PersistedActivityData,
        PersistedBoardData, PersistedTaskData, Sprint, SprintId, StoryPoints, Task, TaskId,
        TaskPriority, TaskStatus, TaskTitle, User, UserId,
    },
    ports::{
        ActivityFilter, ActivityRepository, ActivityRepositoryError, ActivityRepositoryResult,
        BoardRepository, BoardRepositoryError, BoardRepositoryResult, SprintRepository,
        SprintRepositoryError, SprintRepositoryResult, TaskRepository, TaskRepositoryError,
        TaskRepositoryResult, UserRepository, UserRepositoryError, UserRepositoryResult,
    },
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use uuid::Uuid;

/// `PostgreSQL` connection pool type used by the tracker adapters.
pub type TrackerPgPool = Pool<ConnectionManager<PgConnection>>;

/// Error types that can absorb an arbitrary persistence failure.
trait PersistenceError: Sized {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self;
}

impl PersistenceError for TaskRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceError for BoardRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceError for ActivityRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceError for UserRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

impl PersistenceError for SprintRepositoryError {
    fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::persistence(err)
    }
}

/// `PostgreSQL`-backed implementation of every tracker port.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: TrackerPgPool,
}

impl PgStore {
    /// Creates a store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TrackerPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T, E>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut PgConnection) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: PersistenceError + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(E::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(E::persistence)?
    }
}

#[async_trait]
impl TaskRepository for PgStore {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let new_row = task_to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let task_id = task.id();
        let changeset = task_to_changeset(task);

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.find(task_id.into_inner()))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if updated == 0 {
                return Err(TaskRepositoryError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            let deleted = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            if deleted == 0 {
                return Err(TaskRepositoryError::NotFound(id));
            }
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn list_by_board(
        &self,
        board_id: BoardId,
        status: Option<TaskStatus>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let mut query = tasks::table
                .filter(tasks::board_id.eq(board_id.into_inner()))
                .select(TaskRow::as_select())
                .into_boxed();
            if let Some(status) = status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            let rows = query
                .order((tasks::created_at.desc(), tasks::id.desc()))
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_by_board(&self, board_id: BoardId) -> TaskRepositoryResult<i64> {
        self.run_blocking(move |connection| {
            tasks::table
                .filter(tasks::board_id.eq(board_id.into_inner()))
                .count()
                .get_result::<i64>(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }
}

#[async_trait]
impl BoardRepository for PgStore {
    async fn insert(&self, board: &Board) -> BoardRepositoryResult<()> {
        let board_id = board.id();
        let new_row = board_to_new_row(board);

        self.run_blocking(move |connection| {
            diesel::insert_into(boards::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        BoardRepositoryError::DuplicateBoard(board_id)
                    }
                    _ => BoardRepositoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .find(id.into_inner())
                .select(BoardRow::as_select())
                .first::<BoardRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_board).transpose()
        })
        .await
    }

    async fn list(&self) -> BoardRepositoryResult<Vec<Board>> {
        self.run_blocking(move |connection| {
            let rows = boards::table
                .select(BoardRow::as_select())
                .order((boards::created_at.desc(), boards::id.desc()))
                .load::<BoardRow>(connection)
                .map_err(BoardRepositoryError::persistence)?;
            rows.into_iter().map(row_to_board).collect()
        })
        .await
    }

    async fn first_board(&self) -> BoardRepositoryResult<Option<Board>> {
        self.run_blocking(move |connection| {
            let row = boards::table
                .select(BoardRow::as_select())
                .order((boards::created_at.asc(), boards::id.asc()))
                .first::<BoardRow>(connection)
                .optional()
                .map_err(BoardRepositoryError::persistence)?;
            row.map(row_to_board).transpose()
        })
        .await
    }
}

#[async_trait]
impl ActivityRepository for PgStore {
    async fn append(&self, activity: &Activity) -> ActivityRepositoryResult<()> {
        let new_row = activity_to_new_row(activity);

        self.run_blocking(move |connection| {
            diesel::insert_into(activities::table)
                .values(&new_row)
                .execute(connection)
                .map_err(ActivityRepositoryError::persistence)?;
            Ok(())
        })
        .await
    }

    async fn list(&self, filter: &ActivityFilter) -> ActivityRepositoryResult<Vec<Activity>> {
        let filter = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = activities::table
                .select(ActivityRow::as_select())
                .into_boxed();
            if let Some(entity_type) = filter.entity_type {
                query = query.filter(activities::entity_type.eq(entity_type));
            }
            if let Some(entity_id) = filter.entity_id {
                query = query.filter(activities::entity_id.eq(entity_id));
            }
            if let Some(since) = filter.since {
                query = query.filter(activities::created_at.ge(since));
            }
            query = query
                .order((activities::created_at.desc(), activities::id.desc()))
                .offset(filter.offset);
            if let Some(limit) = filter.limit {
                query = query.limit(limit);
            }
            let rows = query
                .load::<ActivityRow>(connection)
                .map_err(ActivityRepositoryError::persistence)?;
            rows.into_iter().map(row_to_activity).collect()
        })
        .await
    }
}

#[async_trait]
impl UserRepository for PgStore {
    async fn find_by_id(&self, id: UserId) -> UserRepositoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .find(id.into_inner())
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserRepositoryError::persistence)?;
            Ok(row.map(row_to_user))
        })
        .await
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> UserRepositoryResult<Vec<User>> {
        let raw_ids: Vec<Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::id.eq_any(raw_ids))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_user).collect())
        })
        .await
    }

    async fn list(&self) -> UserRepositoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .select(UserRow::as_select())
                .order(users::username.asc())
                .load::<UserRow>(connection)
                .map_err(UserRepositoryError::persistence)?;
            Ok(rows.into_iter().map(row_to_user).collect())
        })
        .await
    }
}

#[async_trait]
impl SprintRepository for PgStore {
    async fn find_by_id(&self, id: SprintId) -> SprintRepositoryResult<Option<Sprint>> {
        self.run_blocking(move |connection| {
            let row = sprints::table
                .find(id.into_inner())
                .select(SprintRow::as_select())
                .first::<SprintRow>(connection)
                .optional()
                .map_err(SprintRepositoryError::persistence)?;
            Ok(row.map(row_to_sprint))
        })
        .await
    }
}

fn task_to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        board_id: task.board_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        story_points: task.story_points().value(),
        assignee_id: task.assignee_id().map(UserId::into_inner),
        created_by: task.created_by().into_inner(),
        due_date: task.due_date(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn task_to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        status: task.status().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        story_points: task.story_points().value(),
        assignee_id: task.assignee_id().map(UserId::into_inner),
        due_date: task.due_date(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let title = TaskTitle::new(row.title).map_err(TaskRepositoryError::persistence)?;
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;
    let story_points =
        StoryPoints::new(row.story_points).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(row.id),
        board_id: BoardId::from_uuid(row.board_id),
        title,
        description: row.description,
        status,
        priority,
        story_points,
        assignee_id: row.assignee_id.map(UserId::from_uuid),
        created_by: UserId::from_uuid(row.created_by),
        due_date: row.due_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn board_to_new_row(board: &Board) -> NewBoardRow {
    NewBoardRow {
        id: board.id().into_inner(),
        name: board.name().as_str().to_owned(),
        description: board.description().to_owned(),
        created_by: board.created_by().into_inner(),
        created_at: board.created_at(),
        updated_at: board.updated_at(),
    }
}

fn row_to_board(row: BoardRow) -> BoardRepositoryResult<Board> {
    let name = BoardName::new(row.name).map_err(BoardRepositoryError::persistence)?;
    Ok(Board::from_persisted(PersistedBoardData {
        id: BoardId::from_uuid(row.id),
        name,
        description: row.description,
        created_by: UserId::from_uuid(row.created_by),
        created_at: row.created_at,
        updated_at: row.updated_at,
    }))
}

fn activity_to_new_row(activity: &Activity) -> NewActivityRow {
    NewActivityRow {
        id: activity.id().into_inner(),
        action: activity.action().as_str().to_owned(),
        entity_type: activity.entity_type().to_owned(),
        entity_id: activity.entity_id(),
        user_id: activity.user_id().map(UserId::into_inner),
        details: activity.details().clone(),
        created_at: activity.created_at(),
    }
}

fn row_to_activity(row: ActivityRow) -> ActivityRepositoryResult<Activity> {
    let action =
        ActivityAction::parse(&row.action).map_err(ActivityRepositoryError::persistence)?;
    Ok(Activity::from_persisted(PersistedActivityData {
        id: ActivityId::from_uuid(row.id),
        action,
        entity_type: row.entity_type,
        entity_id: row.entity_id,
        user_id: row.user_id.map(UserId::from_uuid),
        details: row.details,
        created_at: row.created_at,
    }))
}

fn row_to_user(row: UserRow) -> User {
    User::new(UserId::from_uuid(row.id), row.username, row.email)
}

fn row_to_sprint(row: SprintRow) -> Sprint {
    Sprint::new(
        SprintId::from_uuid(row.id),
        BoardId::from_uuid(row.board_id),
        row.start_date,
        row.end_date,
    )
}
