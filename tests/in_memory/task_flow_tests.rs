//! End-to-end mutation flows over the in-memory store.
//!
//! The contract under test: every successful mutation leaves exactly one
//! audit entry, and the audit log outlives the entities it describes.

use super::helpers::{assert_trail_actions, services, Services};
use rstest::rstest;
use teamflow::tracker::{
    domain::{StoryPoints, TaskPatch, TaskStatus},
    services::{CreateTaskRequest, TaskServiceError},
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn a_full_lifecycle_leaves_a_complete_audit_trail(services: Services) {
    let created = services
        .tasks
        .create(CreateTaskRequest::new(
            services.board.id(),
            "Ship the importer",
            services.alice.id,
        ))
        .await
        .expect("task creation should succeed");

    services
        .tasks
        .update(
            created.id,
            TaskPatch::new().with_status(TaskStatus::InProgress),
            Some(services.alice.id),
        )
        .await
        .expect("status update should succeed");
    services
        .tasks
        .update(
            created.id,
            TaskPatch::new()
                .with_story_points(StoryPoints::new(8).expect("valid story points")),
            Some(services.alice.id),
        )
        .await
        .expect("estimate update should succeed");
    services
        .tasks
        .delete(created.id, Some(services.alice.id))
        .await
        .expect("deletion should succeed");

    let trail = services.task_trail(created.id.into_inner()).await;
    assert_trail_actions(&trail, &["deleted", "updated", "updated", "created"])
        .expect("trail should match the mutation sequence");

    // Only the status update carries transition endpoints.
    assert_eq!(trail[2].details["from_status"], "todo");
    assert_eq!(trail[2].details["to_status"], "in_progress");
    assert!(trail[1].details.get("from_status").is_none());
    assert!(trail[3].details.get("from_status").is_none());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn the_audit_log_survives_task_deletion(services: Services) {
    let created = services
        .tasks
        .create(CreateTaskRequest::new(
            services.board.id(),
            "Retire the cron job",
            services.alice.id,
        ))
        .await
        .expect("task creation should succeed");
    services
        .tasks
        .delete(created.id, None)
        .await
        .expect("deletion should succeed");

    let lookup = services.tasks.get(created.id).await;
    assert!(matches!(lookup, Err(TaskServiceError::TaskNotFound(_))));

    let trail = services.task_trail(created.id.into_inner()).await;
    assert_eq!(trail.len(), 2);
    assert_eq!(trail[0].details["title"], "Retire the cron job");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_listings_track_task_churn(services: Services) {
    let kept = services
        .tasks
        .create(CreateTaskRequest::new(
            services.board.id(),
            "Keep this one",
            services.alice.id,
        ))
        .await
        .expect("task creation should succeed");
    let dropped = services
        .tasks
        .create(CreateTaskRequest::new(
            services.board.id(),
            "Drop this one",
            services.alice.id,
        ))
        .await
        .expect("task creation should succeed");
    services
        .tasks
        .delete(dropped.id, None)
        .await
        .expect("deletion should succeed");

    let boards = services.boards.list().await.expect("listing should succeed");
    assert_eq!(boards.len(), 1);
    assert_eq!(boards[0].task_count, 1);

    let remaining = services
        .tasks
        .list_by_board(services.board.id(), None)
        .await
        .expect("listing should succeed");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept.id);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unattributed_mutations_fall_back_to_the_default_actor(services: Services) {
    let created = services
        .tasks
        .create(CreateTaskRequest::new(
            services.board.id(),
            "Write spec",
            services.alice.id,
        ))
        .await
        .expect("task creation should succeed");

    // The update names no actor; the service attributes the configured
    // default.
    services
        .tasks
        .update(
            created.id,
            TaskPatch::new().with_status(TaskStatus::Done),
            None,
        )
        .await
        .expect("status update should succeed");

    let trail = services.task_trail(created.id.into_inner()).await;
    let actor = trail[0].user.as_ref().expect("default actor attributed");
    assert_eq!(actor.username, "alice");
}
