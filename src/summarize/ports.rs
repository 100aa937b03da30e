//! Outbound contract for a remote language-model summarizer.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// A successful remote completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteSummary {
    /// Raw completion text, not yet validated.
    pub text: String,
    /// Provider token accounting, passed through opaquely.
    pub usage: Option<Value>,
}

/// Failures reaching or reading the remote model.
#[derive(Debug, Error)]
pub enum RemoteSummaryError {
    /// The request never completed.
    #[error("summarizer transport failure: {0}")]
    Transport(String),

    /// The provider answered with a non-success status.
    #[error("summarizer returned status {0}")]
    Status(u16),

    /// The response body held no completion choices.
    #[error("summarizer response contained no choices")]
    Empty,
}

/// Remote summarization backend.
///
/// The service composes the chat messages; implementations only carry the
/// instruction and the literal input text to the provider.
#[async_trait]
pub trait RemoteSummarizer: Send + Sync {
    /// Requests a completion for `text` under the given instruction.
    async fn summarize(
        &self,
        instruction: &str,
        text: &str,
    ) -> Result<RemoteSummary, RemoteSummaryError>;
}

/// Backend used when no provider is configured; every call fails, which
/// routes the service to its deterministic fallback.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRemoteSummarizer;

#[async_trait]
impl RemoteSummarizer for NoRemoteSummarizer {
    async fn summarize(
        &self,
        _instruction: &str,
        _text: &str,
    ) -> Result<RemoteSummary, RemoteSummaryError> {
        Err(RemoteSummaryError::Transport(
            "no remote summarizer configured".to_owned(),
        ))
    }
}
