//! Transcript export port
//!
//! Exporters persist a finished (or partial) transcript somewhere outside
//! the process. A failing export never touches the in-memory transcript.

use std::collections::BTreeMap;
use std::path::PathBuf;
use submind_domain::{DiscussionSummary, Message};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),
}

/// Writes transcripts in one or more formats
pub trait TranscriptExporter: Send + Sync {
    /// Export messages plus summary; returns format name → output location
    fn export(
        &self,
        messages: &[Message],
        summary: &DiscussionSummary,
    ) -> Result<BTreeMap<String, PathBuf>, ExportError>;

    /// Export only the summary
    fn export_summary_only(&self, summary: &DiscussionSummary) -> Result<PathBuf, ExportError>;
}
