use super::{
    enhanced_summary, NoRemoteSummarizer, RemoteSummarizer, RemoteSummary, RemoteSummaryError,
    SummaryKind, SummarySource, SummarizeError, SummarizeService,
};
use async_trait::async_trait;
use rstest::rstest;
use serde_json::json;
use std::sync::{Arc, Mutex};

const LONG_TASK: &str = "Build and implement the new reporting backend so analysts \
     can export quarterly numbers without any manual work.";

struct FixedSummarizer {
    text: String,
}

#[async_trait]
impl RemoteSummarizer for FixedSummarizer {
    async fn summarize(
        &self,
        _instruction: &str,
        _text: &str,
    ) -> Result<RemoteSummary, RemoteSummaryError> {
        Ok(RemoteSummary {
            text: self.text.clone(),
            usage: Some(json!({"total_tokens": 42})),
        })
    }
}

struct RecordingSummarizer {
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait]
impl RemoteSummarizer for RecordingSummarizer {
    async fn summarize(
        &self,
        instruction: &str,
        text: &str,
    ) -> Result<RemoteSummary, RemoteSummaryError> {
        self.calls
            .lock()
            .expect("call log poisoned")
            .push((instruction.to_owned(), text.to_owned()));
        Err(RemoteSummaryError::Status(503))
    }
}

#[rstest]
#[case("")]
#[case("   \t\n")]
#[tokio::test(flavor = "multi_thread")]
async fn rejects_blank_input(#[case] text: &str) {
    let service = SummarizeService::new(Arc::new(NoRemoteSummarizer));
    let error = service
        .summarize(text, SummaryKind::Task)
        .await
        .expect_err("blank input should be rejected");
    assert_eq!(error, SummarizeError::EmptyText);
}

#[tokio::test(flavor = "multi_thread")]
async fn short_input_short_circuits_without_a_remote_call() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let service = SummarizeService::new(Arc::new(RecordingSummarizer {
        calls: Arc::clone(&calls),
    }));

    let summary = service
        .summarize("Fix the login button", SummaryKind::Task)
        .await
        .expect("short input should summarize");

    assert_eq!(summary.source, SummarySource::Auto);
    assert_eq!(summary.summary, "Task details are brief and already concise.");
    assert_eq!(
        summary.message.as_deref(),
        Some("Text is already concise enough")
    );
    assert!(calls.lock().expect("call log poisoned").is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn accepts_a_distinct_remote_completion() {
    let service = SummarizeService::new(Arc::new(FixedSummarizer {
        text: "  Analysts get self-serve quarterly exports.  ".to_owned(),
    }));

    let summary = service
        .summarize(LONG_TASK, SummaryKind::Task)
        .await
        .expect("remote completion should be accepted");

    assert_eq!(summary.source, SummarySource::Openai);
    assert_eq!(summary.summary, "Analysts get self-serve quarterly exports.");
    assert_eq!(summary.usage, Some(json!({"total_tokens": 42})));
    assert!(summary.message.is_none());
}

#[rstest]
#[case(LONG_TASK)]
#[case("short")]
#[tokio::test(flavor = "multi_thread")]
async fn falls_back_when_the_remote_echoes_or_truncates(#[case] remote_text: &str) {
    let service = SummarizeService::new(Arc::new(FixedSummarizer {
        text: remote_text.to_owned(),
    }));

    let summary = service
        .summarize(LONG_TASK, SummaryKind::Task)
        .await
        .expect("fallback should produce a summary");

    assert_eq!(summary.source, SummarySource::EnhancedFallback);
    assert!(summary.usage.is_none());
    assert_eq!(
        summary.message.as_deref(),
        Some("AI unavailable, using intelligent text processing")
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn falls_back_when_the_remote_fails() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let service = SummarizeService::new(Arc::new(RecordingSummarizer {
        calls: Arc::clone(&calls),
    }));

    let summary = service
        .summarize(LONG_TASK, SummaryKind::Sprint)
        .await
        .expect("fallback should produce a summary");

    assert_eq!(summary.source, SummarySource::EnhancedFallback);
    assert!(!summary.summary.is_empty());

    let calls = calls.lock().expect("call log poisoned");
    assert_eq!(calls.len(), 1);
    let (instruction, prompt) = &calls[0];
    assert_eq!(*instruction, SummaryKind::Sprint.instruction());
    assert!(prompt.contains("this sprint description"));
    assert!(prompt.contains(LONG_TASK));
}

#[rstest]
#[case(None, SummaryKind::Task)]
#[case(Some("task"), SummaryKind::Task)]
#[case(Some("sprint"), SummaryKind::Sprint)]
#[case(Some("retrospective"), SummaryKind::Generic)]
fn parses_the_request_kind(#[case] value: Option<&str>, #[case] expected: SummaryKind) {
    assert_eq!(SummaryKind::parse(value), expected);
}

#[test]
fn empty_text_yields_the_canned_fallback() {
    assert_eq!(
        enhanced_summary("   ", SummaryKind::Task),
        "No content to summarize."
    );
}

#[test]
fn short_text_is_returned_verbatim_with_collapsed_whitespace() {
    assert_eq!(
        enhanced_summary("  tidy   the \n backlog  ", SummaryKind::Task),
        "📝 Summary: tidy the backlog"
    );
}

#[test]
fn long_text_breaks_at_a_conjunction_and_flags_action_and_urgency() {
    let text = "We must build the ingestion pipeline for nightly imports, and \
         then document every step of the rollout process for the operations team.";
    assert_eq!(
        enhanced_summary(text, SummaryKind::Task),
        "⚡ 🎯 Action: build - We must build the ingestion pipeline for nightly imports"
    );
}

#[test]
fn long_text_without_break_points_is_hard_truncated() {
    let text = "The quarterly report covers revenue figures, churn movements, \
         onboarding latency, roadmap slippage plus several appendix tables of raw numbers.";
    let summary = enhanced_summary(text, SummaryKind::Task);

    let candidate = summary
        .strip_prefix("📋 Task: ")
        .expect("no action word present");
    assert!(candidate.ends_with("..."));
    assert_eq!(candidate.chars().count(), 80);
}

#[test]
fn sprint_budget_is_wider_than_task_budget() {
    let text = "Velocity held steady this iteration while the review backlog \
         shrank considerably thanks to rotating reviewers every single day.";
    let as_task = enhanced_summary(text, SummaryKind::Task);
    let as_sprint = enhanced_summary(text, SummaryKind::Sprint);

    assert!(as_task.ends_with("..."));
    assert!(!as_sprint.ends_with("..."));
}

#[test]
fn fallback_is_deterministic() {
    let text = "Research the caching layer options for the gateway, and write \
         up a comparison covering eviction policy, memory ceiling and operational cost.";
    assert_eq!(
        enhanced_summary(text, SummaryKind::Sprint),
        enhanced_summary(text, SummaryKind::Sprint)
    );
}
