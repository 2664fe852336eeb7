//! Typed error definitions for consolidate.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConsolidateError {
    /// Root is missing or not a directory. Raised before anything is touched.
    #[error("Invalid root '{path}': {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    /// A directory below root could not be listed; its subtree was skipped.
    #[error("Cannot read directory '{path}': {source}")]
    SubtreeUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry below root whose type could not be read; it was left alone.
    #[error("Cannot inspect '{path}': {source}")]
    EntryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Move failed for '{path}': {message}")]
    MoveFailed { path: PathBuf, message: String },

    #[error("No free numbered name for '{path}' within {limit} attempts")]
    NameResolutionExhausted { path: PathBuf, limit: u64 },

    #[error("Interactive prompt failed: {0}")]
    PromptFailed(String),

    #[error("Interactive duplicate handling requested but no prompt was supplied")]
    MissingPrompt,
}

impl ConsolidateError {
    /// Stable short identifier, used as the `kind` of recorded error entries
    /// and as a structured log field.
    pub fn code(&self) -> &'static str {
        match self {
            ConsolidateError::InvalidRoot { .. } => "invalid_root",
            ConsolidateError::SubtreeUnreadable { .. } => "subtree_unreadable",
            ConsolidateError::EntryUnreadable { .. } => "entry_unreadable",
            ConsolidateError::MoveFailed { .. } => "move_failed",
            ConsolidateError::NameResolutionExhausted { .. } => "name_resolution_exhausted",
            ConsolidateError::PromptFailed(_) => "prompt_failed",
            ConsolidateError::MissingPrompt => "missing_prompt",
        }
    }

    pub(crate) fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        ConsolidateError::InvalidRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
