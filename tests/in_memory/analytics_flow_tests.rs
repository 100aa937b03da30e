//! Analytics rollups computed over state mutated through the services.

use super::helpers::{services, Services};
use rstest::rstest;
use teamflow::analytics::AnalyticsQuery;
use teamflow::tracker::{
    domain::{TaskPatch, TaskStatus},
    services::CreateTaskRequest,
};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_figures_follow_the_workflow(services: Services) {
    let mut ids = Vec::new();
    for title in ["One", "Two", "Three", "Four"] {
        let view = services
            .tasks
            .create(CreateTaskRequest::new(
                services.board.id(),
                title,
                services.alice.id,
            ))
            .await
            .expect("task creation should succeed");
        ids.push(view.id);
    }

    let before = services
        .analytics
        .report(AnalyticsQuery::default())
        .await
        .expect("report should succeed");
    assert_eq!(before.overview.total_tasks, 4);
    assert_eq!(before.overview.completed_tasks, 0);
    assert_eq!(before.overview.completion_rate, 0);

    for id in ids.iter().take(3) {
        services
            .tasks
            .update(
                *id,
                TaskPatch::new().with_status(TaskStatus::Done),
                Some(services.alice.id),
            )
            .await
            .expect("status update should succeed");
    }

    let after = services
        .analytics
        .report(AnalyticsQuery::default())
        .await
        .expect("report should succeed");
    assert_eq!(after.overview.completed_tasks, 3);
    assert_eq!(after.overview.completion_rate, 75);
    assert_eq!(after.overview.todo_tasks, 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recent_activities_are_capped_at_twenty(services: Services) {
    for index in 0..25 {
        services
            .tasks
            .create(CreateTaskRequest::new(
                services.board.id(),
                format!("Task {index}"),
                services.alice.id,
            ))
            .await
            .expect("task creation should succeed");
    }

    let report = services
        .analytics
        .report(AnalyticsQuery::default())
        .await
        .expect("report should succeed");

    assert_eq!(report.recent_activities.len(), 20);
    // The newest creation is first.
    assert_eq!(report.recent_activities[0].details["title"], "Task 24");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_activity_counts_mutations_per_user(services: Services) {
    let created = services
        .tasks
        .create(CreateTaskRequest::new(
            services.board.id(),
            "Write spec",
            services.alice.id,
        ))
        .await
        .expect("task creation should succeed");
    services
        .tasks
        .update(
            created.id,
            TaskPatch::new().with_status(TaskStatus::Done),
            Some(services.alice.id),
        )
        .await
        .expect("status update should succeed");

    let report = services
        .analytics
        .report(AnalyticsQuery::default())
        .await
        .expect("report should succeed");

    let alice = report
        .user_activity
        .iter()
        .find(|summary| summary.username == "alice")
        .expect("alice should appear in the rollup");
    assert_eq!(alice.tasks_created, 1);
    assert_eq!(alice.tasks_updated, 1);
    assert_eq!(alice.activity_count, 2);
}
