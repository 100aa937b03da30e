//! Orchestration tests for the board service over the in-memory store.

use std::sync::Arc;

use crate::tracker::{
    adapters::memory::InMemoryStore,
    domain::{TrackerDomainError, User, UserId},
    ports::ActivityFilter,
    services::{
        ActivityService, BoardService, BoardServiceError, CreateTaskRequest, ErrorKind,
        TaskService,
    },
};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};

struct BoardFixture {
    user: User,
    boards: BoardService,
    tasks: TaskService,
    activities: ActivityService,
}

#[fixture]
fn fixture() -> BoardFixture {
    let store = Arc::new(InMemoryStore::new());
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);

    let user = User::new(UserId::new(), "alice", "alice@example.com");
    store.seed_user(user.clone());

    let boards = BoardService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
    );
    let tasks = TaskService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
        None,
    );
    let activities = ActivityService::new(store.clone(), store, clock, None);

    BoardFixture {
        user,
        boards,
        tasks,
        activities,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_trims_the_name_and_audits_the_creation(fixture: BoardFixture) {
    let view = fixture
        .boards
        .create("  Roadmap  ", "Quarterly planning", fixture.user.id)
        .await
        .expect("board creation should succeed");

    assert_eq!(view.name, "Roadmap");
    assert_eq!(view.description, "Quarterly planning");
    assert_eq!(view.task_count, 0);
    assert_eq!(view.created_by.username, "alice");

    let filter = ActivityFilter::new()
        .with_entity_type("board")
        .with_entity_id(view.id.into_inner());
    let trail = fixture
        .activities
        .list(&filter)
        .await
        .expect("activity listing should succeed");
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, "created");
    assert_eq!(trail[0].details["name"], "Roadmap");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_a_blank_name(fixture: BoardFixture) {
    let result = fixture.boards.create("   ", "", fixture.user.id).await;

    let Err(error) = result else {
        panic!("blank board name must be rejected");
    };
    assert!(matches!(
        error,
        BoardServiceError::Validation(TrackerDomainError::EmptyBoardName)
    ));
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_is_newest_first_with_task_counts(fixture: BoardFixture) {
    let older = fixture
        .boards
        .create("Backlog", "", fixture.user.id)
        .await
        .expect("board creation should succeed");
    let newer = fixture
        .boards
        .create("Sprint board", "", fixture.user.id)
        .await
        .expect("board creation should succeed");
    fixture
        .tasks
        .create(CreateTaskRequest::new(
            newer.id,
            "Plan the sprint",
            fixture.user.id,
        ))
        .await
        .expect("task creation should succeed");

    let views = fixture.boards.list().await.expect("listing should succeed");

    assert_eq!(views.len(), 2);
    assert_eq!(views[0].id, newer.id);
    assert_eq!(views[0].task_count, 1);
    assert_eq!(views[1].id, older.id);
    assert_eq!(views[1].task_count, 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn an_unresolvable_creator_lists_as_unknown(fixture: BoardFixture) {
    let view = fixture
        .boards
        .create("Orphaned", "", UserId::new())
        .await
        .expect("board creation should succeed");

    assert_eq!(view.created_by.username, "Unknown");
}
