//! Shared fixtures for the in-memory integration tests.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use rstest::fixture;
use teamflow::analytics::AnalyticsService;
use teamflow::tracker::{
    adapters::memory::InMemoryStore,
    domain::{Board, BoardName, User, UserId},
    ports::ActivityFilter,
    services::{ActivityService, ActivityView, BoardService, TaskService},
};
use uuid::Uuid;

/// Every tracker service wired over one shared in-memory store, with a
/// seeded board and user.
pub struct Services {
    pub board: Board,
    pub alice: User,
    pub tasks: TaskService,
    pub boards: BoardService,
    pub activities: ActivityService,
    pub analytics: AnalyticsService,
}

impl Services {
    /// Returns the audit trail for one task, newest-first.
    ///
    /// # Panics
    ///
    /// Panics when the activity listing fails.
    pub async fn task_trail(&self, entity_id: Uuid) -> Vec<ActivityView> {
        let filter = ActivityFilter::new()
            .with_entity_type("task")
            .with_entity_id(entity_id);
        self.activities
            .list(&filter)
            .await
            .expect("activity listing should succeed")
    }
}

/// Asserts the trail carries exactly the expected actions, newest-first.
///
/// # Errors
///
/// Returns an error when the trail length or any action differs.
pub fn assert_trail_actions(
    trail: &[ActivityView],
    expected: &[&str],
) -> Result<(), eyre::Report> {
    eyre::ensure!(
        trail.len() == expected.len(),
        "expected {} audit entries, found {}",
        expected.len(),
        trail.len()
    );
    for (entry, want) in trail.iter().zip(expected) {
        eyre::ensure!(
            entry.action == *want,
            "audit action mismatch: {} != {}",
            entry.action,
            want
        );
    }
    Ok(())
}

/// Provides fully wired services over a fresh store for each test.
#[fixture]
pub fn services() -> Services {
    let store = Arc::new(InMemoryStore::new());
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);

    let alice = User::new(UserId::new(), "alice", "alice@example.com");
    store.seed_user(alice.clone());
    let board = Board::create(
        BoardName::new("Platform").expect("valid board name"),
        "Core platform work",
        alice.id,
        &DefaultClock,
    );
    store.seed_board(board.clone());

    let tasks = TaskService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
        Some(alice.id),
    );
    let boards = BoardService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
    );
    let activities = ActivityService::new(store.clone(), store.clone(), clock.clone(), None);
    let analytics = AnalyticsService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        clock,
    );

    Services {
        board,
        alice,
        tasks,
        boards,
        activities,
        analytics,
    }
}
