//! Text summarization with remote and deterministic fallback paths.

mod fallback;
mod ports;
mod service;

pub use fallback::enhanced_summary;
pub use ports::{NoRemoteSummarizer, RemoteSummarizer, RemoteSummary, RemoteSummaryError};
pub use service::{
    Summary, SummaryKind, SummarySource, SummarizeError, SummarizeResult, SummarizeService,
};

#[cfg(test)]
mod tests;
