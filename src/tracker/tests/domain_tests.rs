//! Invariant tests for the tracker domain types.

use crate::tracker::domain::{
    ActivityAction, BoardId, BoardName, NewTask, Sprint, SprintId, StoryPoints, Task,
    TaskChangeDetails, TaskPatch, TaskPriority, TaskStatus, TaskTitle, TrackerDomainError, UserId,
};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

fn test_task(clock: &DefaultClock) -> Task {
    let title = TaskTitle::new("Ship the importer").expect("valid title");
    Task::create(NewTask::new(BoardId::new(), title, UserId::new()), clock)
}

#[rstest]
fn task_title_is_trimmed() {
    let title = TaskTitle::new("  Ship the importer  ").expect("valid title");
    assert_eq!(title.as_str(), "Ship the importer");
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\t\n")]
fn task_title_rejects_blank_input(#[case] raw: &str) {
    let result = TaskTitle::new(raw);
    assert!(matches!(result, Err(TrackerDomainError::EmptyTaskTitle)));
}

#[rstest]
#[case("")]
#[case("  \n ")]
fn board_name_rejects_blank_input(#[case] raw: &str) {
    let result = BoardName::new(raw);
    assert!(matches!(result, Err(TrackerDomainError::EmptyBoardName)));
}

#[rstest]
#[case(0)]
#[case(-3)]
fn story_points_reject_non_positive_values(#[case] value: i32) {
    let result = StoryPoints::new(value);
    assert!(matches!(
        result,
        Err(TrackerDomainError::InvalidStoryPoints(got)) if got == value
    ));
}

#[rstest]
fn story_points_accept_positive_values() {
    let points = StoryPoints::new(5).expect("valid story points");
    assert_eq!(points.value(), 5);
}

#[rstest]
#[case(" Todo ", TaskStatus::Todo)]
#[case("IN_PROGRESS", TaskStatus::InProgress)]
#[case("done", TaskStatus::Done)]
fn status_parses_case_insensitively(#[case] raw: &str, #[case] expected: TaskStatus) {
    assert_eq!(TaskStatus::try_from(raw).expect("valid status"), expected);
}

#[rstest]
fn status_rejects_unknown_names() {
    assert!(TaskStatus::try_from("blocked").is_err());
}

#[rstest]
#[case("LOW", TaskPriority::Low)]
#[case(" medium ", TaskPriority::Medium)]
#[case("high", TaskPriority::High)]
fn priority_parses_case_insensitively(#[case] raw: &str, #[case] expected: TaskPriority) {
    assert_eq!(TaskPriority::try_from(raw).expect("valid priority"), expected);
}

#[rstest]
fn priority_rejects_unknown_names() {
    assert!(TaskPriority::try_from("urgent").is_err());
}

#[rstest]
fn activity_action_parses_known_and_custom_names() {
    assert_eq!(
        ActivityAction::parse("created").expect("valid action"),
        ActivityAction::CREATED
    );
    assert_eq!(
        ActivityAction::parse("archived").expect("valid action"),
        ActivityAction::Custom("archived".to_owned())
    );
}

#[rstest]
fn activity_action_rejects_blank_names() {
    let result = ActivityAction::parse("  ");
    assert!(matches!(
        result,
        Err(TrackerDomainError::EmptyActivityAction)
    ));
}

#[rstest]
fn create_applies_the_documented_defaults(clock: DefaultClock) {
    let task = test_task(&clock);

    assert_eq!(task.status(), TaskStatus::Todo);
    assert_eq!(task.priority(), TaskPriority::Medium);
    assert_eq!(task.story_points(), StoryPoints::ONE);
    assert!(task.assignee_id().is_none());
    assert!(task.due_date().is_none());
    assert_eq!(task.created_at(), task.updated_at());
}

#[rstest]
fn apply_reports_a_status_transition(clock: DefaultClock) {
    let mut task = test_task(&clock);

    let outcome = task.apply(TaskPatch::new().with_status(TaskStatus::Done), &clock);

    assert_eq!(
        outcome.status_change,
        Some((TaskStatus::Todo, TaskStatus::Done))
    );
    assert!(!outcome.field_changed);
    assert!(outcome.any_change());
    assert_eq!(task.status(), TaskStatus::Done);
}

#[rstest]
fn apply_with_equal_values_refreshes_updated_at_without_deltas(clock: DefaultClock) {
    let mut task = test_task(&clock);
    let before = task.updated_at();

    let outcome = task.apply(
        TaskPatch::new().with_priority(TaskPriority::Medium),
        &clock,
    );

    assert!(!outcome.any_change());
    assert!(task.updated_at() >= before);
}

#[rstest]
fn apply_set_none_clears_nullable_fields(clock: DefaultClock) {
    let title = TaskTitle::new("Document the rollout").expect("valid title");
    let mut spec = NewTask::new(BoardId::new(), title, UserId::new());
    spec.description = Some("Draft the runbook".to_owned());
    spec.due_date = NaiveDate::from_ymd_opt(2026, 9, 15);
    let mut task = Task::create(spec, &clock);

    let outcome = task.apply(
        TaskPatch::new()
            .with_description(None)
            .with_due_date(None),
        &clock,
    );

    assert!(outcome.field_changed);
    assert!(task.description().is_none());
    assert!(task.due_date().is_none());
}

#[rstest]
fn an_empty_patch_reports_itself_empty() {
    assert!(TaskPatch::new().is_empty());
    assert!(!TaskPatch::new().with_status(TaskStatus::Done).is_empty());
}

#[rstest]
fn title_only_details_omit_the_transition_keys() {
    let value = TaskChangeDetails::title_only("Ship the importer").into_value();

    assert_eq!(value["title"], "Ship the importer");
    assert!(value.get("from_status").is_none());
    assert!(value.get("to_status").is_none());
}

#[rstest]
fn status_change_details_carry_both_endpoints() {
    let value =
        TaskChangeDetails::status_change("Ship the importer", "todo", "done").into_value();

    assert_eq!(value["from_status"], "todo");
    assert_eq!(value["to_status"], "done");
}

#[rstest]
fn sprint_window_bounds_are_inclusive() {
    let start = NaiveDate::from_ymd_opt(2026, 8, 3).expect("valid date");
    let end = NaiveDate::from_ymd_opt(2026, 8, 14).expect("valid date");
    let sprint = Sprint::new(SprintId::new(), BoardId::new(), start, end);

    assert!(sprint.contains(start));
    assert!(sprint.contains(end));
    assert!(!sprint.contains(start.pred_opt().expect("valid date")));
    assert!(!sprint.contains(end.succ_opt().expect("valid date")));
}
