//! Summarization flow with three terminal outcomes.
//!
//! Evaluated in order: trivial inputs short-circuit without a network
//! call, a valid remote completion wins, and everything else lands on the
//! deterministic heuristic fallback. The flow never surfaces a remote
//! failure to the caller.

use super::fallback::enhanced_summary;
use super::ports::RemoteSummarizer;
use crate::tracker::services::ErrorKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Trimmed inputs shorter than this skip the remote call entirely.
const TRIVIAL_THRESHOLD: usize = 50;

/// A remote completion must be longer than this to be accepted.
const MIN_REMOTE_LENGTH: usize = 10;

/// What kind of text is being summarized; selects the instruction and the
/// fallback length budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryKind {
    /// A task description.
    #[default]
    Task,
    /// Sprint logs or notes.
    Sprint,
    /// Anything else.
    Generic,
}

impl SummaryKind {
    /// Parses a request `type` field; unknown values fall back to
    /// [`SummaryKind::Generic`], an absent field to [`SummaryKind::Task`].
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            None => Self::Task,
            Some("task") => Self::Task,
            Some("sprint") => Self::Sprint,
            Some(_) => Self::Generic,
        }
    }

    /// Label used when composing the remote user prompt.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Sprint => "sprint",
            Self::Generic => "text",
        }
    }

    /// Fallback length budget in characters.
    #[must_use]
    pub const fn length_budget(self) -> usize {
        match self {
            Self::Task => 80,
            Self::Sprint | Self::Generic => 120,
        }
    }

    /// Role instruction sent to the remote model.
    #[must_use]
    pub const fn instruction(self) -> &'static str {
        match self {
            Self::Task => {
                "You are a helpful assistant that creates concise, actionable \
                 summaries of task descriptions. Focus on the main objectives, \
                 key requirements, and deliverables. Use bullet points if \
                 helpful. Keep it under 100 words and make it different from \
                 the original text."
            }
            Self::Sprint => {
                "You are a helpful assistant that summarizes sprint logs and \
                 notes. Provide a clear overview of progress, blockers, and \
                 next steps. Keep it under 150 words."
            }
            Self::Generic => {
                "You are a helpful assistant that provides concise summaries. \
                 Keep your response clear and under 100 words."
            }
        }
    }
}

/// Which path produced a summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummarySource {
    /// Trivial-input shortcut, no network call made.
    Auto,
    /// Accepted remote completion.
    Openai,
    /// Deterministic heuristic fallback.
    EnhancedFallback,
}

/// A produced summary; `summary` is never empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// The summary text.
    pub summary: String,
    /// Which path produced it.
    pub source: SummarySource,
    /// Provider token accounting, present only for remote summaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Value>,
    /// Human-readable note about why this path was taken.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Validation errors for summarization requests.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummarizeError {
    /// The input was empty or all whitespace.
    #[error("Text content is required for summarization")]
    EmptyText,
}

impl SummarizeError {
    /// Classifies the error for boundary mapping.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyText => ErrorKind::Validation,
        }
    }
}

/// Result type for summarization.
pub type SummarizeResult<T> = Result<T, SummarizeError>;

/// Orchestrates the remote summarizer and the heuristic fallback.
#[derive(Clone)]
pub struct SummarizeService {
    remote: Arc<dyn RemoteSummarizer>,
}

impl SummarizeService {
    /// Creates a summarize service over the given backend.
    #[must_use]
    pub fn new(remote: Arc<dyn RemoteSummarizer>) -> Self {
        Self { remote }
    }

    /// Summarizes `text`, always returning a non-empty summary.
    ///
    /// # Errors
    ///
    /// Returns [`SummarizeError::EmptyText`] when the trimmed input is
    /// empty. Remote failures are absorbed into the fallback path.
    pub async fn summarize(&self, text: &str, kind: SummaryKind) -> SummarizeResult<Summary> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SummarizeError::EmptyText);
        }

        if trimmed.chars().count() < TRIVIAL_THRESHOLD {
            return Ok(Summary {
                summary: "Task details are brief and already concise.".to_owned(),
                source: SummarySource::Auto,
                usage: None,
                message: Some("Text is already concise enough".to_owned()),
            });
        }

        let prompt = format!(
            "Please create a concise summary of this {} description (make it \
             different from the original): \"{text}\"",
            kind.label(),
        );
        match self.remote.summarize(kind.instruction(), &prompt).await {
            Ok(remote) => {
                let candidate = remote.text.trim();
                if !candidate.is_empty()
                    && candidate != trimmed
                    && candidate.chars().count() > MIN_REMOTE_LENGTH
                {
                    return Ok(Summary {
                        summary: candidate.to_owned(),
                        source: SummarySource::Openai,
                        usage: remote.usage,
                        message: None,
                    });
                }
                tracing::warn!("remote summary was unusable, using enhanced fallback");
            }
            Err(error) => {
                tracing::warn!(%error, "remote summarizer failed, using enhanced fallback");
            }
        }

        Ok(Summary {
            summary: enhanced_summary(text, kind),
            source: SummarySource::EnhancedFallback,
            usage: None,
            message: Some("AI unavailable, using intelligent text processing".to_owned()),
        })
    }
}
