//! Orchestration tests for the task service over the in-memory store.
//!
//! The central property under test: every successful mutation leaves
//! exactly one activity entry behind, and failed mutations leave none.

use std::sync::Arc;

use crate::tracker::{
    adapters::memory::InMemoryStore,
    domain::{
        Board, BoardId, BoardName, StoryPoints, TaskId, TaskPatch, TaskPriority, TaskStatus,
        TaskTitle, TrackerDomainError, User, UserId,
    },
    ports::ActivityFilter,
    services::{
        ActivityService, ActivityView, CreateTaskRequest, ErrorKind, TaskService,
        TaskServiceError,
    },
};
use mockable::{Clock, DefaultClock};
use rstest::{fixture, rstest};
use uuid::Uuid;

struct TrackerFixture {
    board: Board,
    user: User,
    tasks: TaskService,
    activities: ActivityService,
}

impl TrackerFixture {
    fn create_request(&self, title: &str) -> CreateTaskRequest {
        CreateTaskRequest::new(self.board.id(), title, self.user.id)
    }

    async fn audit_trail(&self, entity_id: Uuid) -> Vec<ActivityView> {
        let filter = ActivityFilter::new()
            .with_entity_type("task")
            .with_entity_id(entity_id);
        self.activities
            .list(&filter)
            .await
            .expect("activity listing should succeed")
    }
}

#[fixture]
fn tracker() -> TrackerFixture {
    let store = Arc::new(InMemoryStore::new());
    let clock: Arc<dyn Clock + Send + Sync> = Arc::new(DefaultClock);

    let user = User::new(UserId::new(), "alice", "alice@example.com");
    store.seed_user(user.clone());
    let board = Board::create(
        BoardName::new("Platform").expect("valid board name"),
        "Core platform work",
        user.id,
        &DefaultClock,
    );
    store.seed_board(board.clone());

    let tasks = TaskService::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        clock.clone(),
        None,
    );
    let activities = ActivityService::new(store.clone(), store, clock, None);

    TrackerFixture {
        board,
        user,
        tasks,
        activities,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_applies_defaults_and_audits_the_creation(tracker: TrackerFixture) {
    let view = tracker
        .tasks
        .create(tracker.create_request("Write spec"))
        .await
        .expect("task creation should succeed");

    assert_eq!(view.title, "Write spec");
    assert_eq!(view.status, TaskStatus::Todo);
    assert_eq!(view.priority, TaskPriority::Medium);
    assert_eq!(view.story_points, 1);
    assert!(view.assignee.is_none());

    let trail = tracker.audit_trail(view.id.into_inner()).await;
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, "created");
    assert_eq!(trail[0].details["title"], "Write spec");
    let actor = trail[0].user.as_ref().expect("creation carries an actor");
    assert_eq!(actor.username, "alice");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_resolves_the_assignee_display_fields(tracker: TrackerFixture) {
    let view = tracker
        .tasks
        .create(tracker.create_request("Review rollout").with_assignee(tracker.user.id))
        .await
        .expect("task creation should succeed");

    let assignee = view.assignee.expect("assignee should be resolved");
    assert_eq!(assignee.username, "alice");
    assert_eq!(assignee.email, "alice@example.com");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_a_blank_title(tracker: TrackerFixture) {
    let result = tracker.tasks.create(tracker.create_request("   ")).await;

    let Err(error) = result else {
        panic!("blank title must be rejected");
    };
    assert!(matches!(
        error,
        TaskServiceError::Validation(TrackerDomainError::EmptyTaskTitle)
    ));
    assert_eq!(error.kind(), ErrorKind::Validation);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_an_unknown_board(tracker: TrackerFixture) {
    let missing = BoardId::new();
    let request = CreateTaskRequest::new(missing, "Orphaned task", tracker.user.id);

    let result = tracker.tasks.create(request).await;

    let Err(error) = result else {
        panic!("unknown board must be rejected");
    };
    assert!(matches!(error, TaskServiceError::BoardNotFound(id) if id == missing));
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_an_unknown_assignee(tracker: TrackerFixture) {
    let ghost = UserId::new();
    let request = tracker.create_request("Assign to nobody").with_assignee(ghost);

    let result = tracker.tasks.create(request).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::AssigneeNotFound(id)) if id == ghost
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_status_update_audits_the_transition(tracker: TrackerFixture) {
    let created = tracker
        .tasks
        .create(tracker.create_request("Write spec"))
        .await
        .expect("task creation should succeed");

    let updated = tracker
        .tasks
        .update(
            created.id,
            TaskPatch::new().with_status(TaskStatus::InProgress),
            Some(tracker.user.id),
        )
        .await
        .expect("status update should succeed");
    assert_eq!(updated.status, TaskStatus::InProgress);

    let trail = tracker.audit_trail(created.id.into_inner()).await;
    assert_eq!(trail.len(), 2);
    // Newest-first: the update precedes the creation entry.
    assert_eq!(trail[0].action, "updated");
    assert_eq!(trail[0].details["title"], "Write spec");
    assert_eq!(trail[0].details["from_status"], "todo");
    assert_eq!(trail[0].details["to_status"], "in_progress");
    assert_eq!(trail[1].action, "created");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_non_status_update_audits_the_title_only(tracker: TrackerFixture) {
    let created = tracker
        .tasks
        .create(tracker.create_request("Write spec"))
        .await
        .expect("task creation should succeed");

    let points = StoryPoints::new(5).expect("valid story points");
    tracker
        .tasks
        .update(
            created.id,
            TaskPatch::new().with_story_points(points),
            None,
        )
        .await
        .expect("update should succeed");

    let trail = tracker.audit_trail(created.id.into_inner()).await;
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].action, "updated");
    assert_eq!(trail[0].details["title"], "Write spec");
    assert!(trail[0].details.get("from_status").is_none());
    assert!(trail[0].details.get("to_status").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_no_op_update_records_no_activity(tracker: TrackerFixture) {
    let created = tracker
        .tasks
        .create(tracker.create_request("Write spec"))
        .await
        .expect("task creation should succeed");

    // Medium is already the priority; the write succeeds but nothing
    // changed value.
    tracker
        .tasks
        .update(
            created.id,
            TaskPatch::new().with_priority(TaskPriority::Medium),
            None,
        )
        .await
        .expect("no-op update should still succeed");

    let trail = tracker.audit_trail(created.id.into_inner()).await;
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action, "created");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn an_empty_update_is_rejected_without_an_audit_entry(tracker: TrackerFixture) {
    let created = tracker
        .tasks
        .create(tracker.create_request("Write spec"))
        .await
        .expect("task creation should succeed");

    let result = tracker
        .tasks
        .update(created.id, TaskPatch::new(), None)
        .await;

    let Err(error) = result else {
        panic!("an empty patch must be rejected");
    };
    assert!(matches!(error, TaskServiceError::EmptyUpdate));
    assert_eq!(error.kind(), ErrorKind::Validation);

    let trail = tracker.audit_trail(created.id.into_inner()).await;
    assert_eq!(trail.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn updating_a_missing_task_is_not_found(tracker: TrackerFixture) {
    let missing = TaskId::new();

    let result = tracker
        .tasks
        .update(
            missing,
            TaskPatch::new().with_status(TaskStatus::Done),
            None,
        )
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::TaskNotFound(id)) if id == missing
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_title_patch_replaces_the_stored_title(tracker: TrackerFixture) {
    let created = tracker
        .tasks
        .create(tracker.create_request("Write spec"))
        .await
        .expect("task creation should succeed");

    let title = TaskTitle::new("Write the final spec").expect("valid title");
    let updated = tracker
        .tasks
        .update(created.id, TaskPatch::new().with_title(title), None)
        .await
        .expect("title update should succeed");

    assert_eq!(updated.title, "Write the final spec");
    let trail = tracker.audit_trail(created.id.into_inner()).await;
    // The audit entry carries the post-update title.
    assert_eq!(trail[0].details["title"], "Write the final spec");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn delete_audits_with_the_pre_delete_title(tracker: TrackerFixture) {
    let created = tracker
        .tasks
        .create(tracker.create_request("Retire the cron job"))
        .await
        .expect("task creation should succeed");

    tracker
        .tasks
        .delete(created.id, Some(tracker.user.id))
        .await
        .expect("deletion should succeed");

    let result = tracker.tasks.get(created.id).await;
    assert!(matches!(result, Err(TaskServiceError::TaskNotFound(_))));

    let trail = tracker.audit_trail(created.id.into_inner()).await;
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].action, "deleted");
    assert_eq!(trail[0].details["title"], "Retire the cron job");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_missing_task_records_nothing(tracker: TrackerFixture) {
    let missing = TaskId::new();

    let result = tracker.tasks.delete(missing, None).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::TaskNotFound(id)) if id == missing
    ));
    let trail = tracker.audit_trail(missing.into_inner()).await;
    assert!(trail.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_by_board_is_newest_first_and_filters_by_status(tracker: TrackerFixture) {
    let first = tracker
        .tasks
        .create(tracker.create_request("First"))
        .await
        .expect("task creation should succeed");
    tracker
        .tasks
        .create(tracker.create_request("Second"))
        .await
        .expect("task creation should succeed");
    let third = tracker
        .tasks
        .create(tracker.create_request("Third"))
        .await
        .expect("task creation should succeed");
    tracker
        .tasks
        .update(
            first.id,
            TaskPatch::new().with_status(TaskStatus::Done),
            None,
        )
        .await
        .expect("status update should succeed");

    let all = tracker
        .tasks
        .list_by_board(tracker.board.id(), None)
        .await
        .expect("listing should succeed");
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].id, third.id);

    let done = tracker
        .tasks
        .list_by_board(tracker.board.id(), Some(TaskStatus::Done))
        .await
        .expect("filtered listing should succeed");
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].id, first.id);
}
