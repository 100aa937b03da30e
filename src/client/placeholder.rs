//! Fixed placeholder data shown when the initial load fails.
//!
//! The ids and timestamps are constants so degraded state is
//! deterministic and recognisable in bug reports.

use crate::tracker::domain::{ActivityId, TaskId, TaskPriority, TaskStatus, UserDisplay};
use crate::tracker::services::{ActivityView, TaskView};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use uuid::Uuid;

fn sample_user(username: &str, email: &str) -> UserDisplay {
    UserDisplay {
        username: username.to_owned(),
        email: email.to_owned(),
        avatar: None,
    }
}

fn sample_time(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

fn sample_task(
    id: u128,
    title: &str,
    description: &str,
    status: TaskStatus,
    priority: TaskPriority,
    story_points: i32,
    assignee: UserDisplay,
    created: DateTime<Utc>,
) -> TaskView {
    TaskView {
        id: TaskId::from_uuid(Uuid::from_u128(id)),
        title: title.to_owned(),
        description: Some(description.to_owned()),
        status,
        priority,
        story_points,
        due_date: None,
        created_at: created,
        updated_at: created,
        assignee: Some(assignee),
    }
}

/// Placeholder task board shown when the server is unreachable.
#[must_use]
pub fn placeholder_tasks() -> Vec<TaskView> {
    vec![
        sample_task(
            1,
            "[sample] Enhance your brand potential with giant advertising blimps",
            "Research and develop new advertising strategies using innovative \
             blimp technology. This involves market analysis, cost estimation, \
             and feasibility studies.",
            TaskStatus::Todo,
            TaskPriority::High,
            5,
            sample_user("Michael Russell", "michael.russell@example.com"),
            sample_time(2024, 11, 30),
        ),
        sample_task(
            2,
            "[sample] Global travel and vacations luxury travel on a tight budget",
            "Create a comprehensive guide for budget-friendly luxury travel \
             experiences worldwide.",
            TaskStatus::Todo,
            TaskPriority::Medium,
            3,
            sample_user("Hilda Carter", "hilda.carter@example.com"),
            sample_time(2024, 11, 30),
        ),
        sample_task(
            3,
            "[sample] The basics of buying a telescope",
            "Write an educational article about telescope purchasing \
             considerations for amateur astronomers.",
            TaskStatus::InProgress,
            TaskPriority::Low,
            2,
            sample_user("Duane Little", "duane.little@example.com"),
            sample_time(2024, 3, 8),
        ),
        sample_task(
            4,
            "[sample] Hollywood hairstyles do not require a trip to a high priced salon",
            "Develop DIY hairstyling tutorials for achieving celebrity looks \
             at home.",
            TaskStatus::Done,
            TaskPriority::Medium,
            3,
            sample_user("Lillie Dennis", "lillie.dennis@example.com"),
            sample_time(2024, 5, 3),
        ),
    ]
}

/// Placeholder activity feed shown when the server is unreachable.
#[must_use]
pub fn placeholder_activities() -> Vec<ActivityView> {
    let admin = sample_user("admin", "admin@example.com");
    vec![
        ActivityView {
            id: ActivityId::from_uuid(Uuid::from_u128(1)),
            action: "created".to_owned(),
            entity_type: "task".to_owned(),
            entity_id: Uuid::from_u128(1),
            details: json!({"title": "New task created"}),
            created_at: sample_time(2024, 11, 30),
            user: Some(admin.clone()),
        },
        ActivityView {
            id: ActivityId::from_uuid(Uuid::from_u128(2)),
            action: "updated".to_owned(),
            entity_type: "task".to_owned(),
            entity_id: Uuid::from_u128(3),
            details: json!({"title": "Task moved to In Progress"}),
            created_at: sample_time(2024, 11, 30),
            user: Some(admin),
        },
    ]
}
