//! Run statistics: the accumulator threaded through a consolidation run.
//!
//! Every candidate file bumps exactly one of `moved`, `skipped`, `errors`.
//! Walk errors (unreadable subtrees or entries) add an error entry without
//! being a candidate.

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::errors::ConsolidateError;

/// One recorded failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    pub path: PathBuf,
    /// Stable error code, see `ConsolidateError::code`.
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Files discovered below root (root-level files excluded).
    pub candidates: u64,
    pub moved: u64,
    pub skipped: u64,
    pub errors: u64,
    /// True when an interactive prompt failed and the run stopped early.
    pub aborted: bool,
    pub error_details: Vec<ErrorDetail>,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_candidate(&mut self) {
        self.candidates += 1;
    }

    pub(crate) fn record_moved(&mut self) {
        self.moved += 1;
    }

    pub(crate) fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    pub(crate) fn record_error(&mut self, path: &Path, err: &ConsolidateError) {
        self.errors += 1;
        self.error_details.push(ErrorDetail {
            path: path.to_path_buf(),
            kind: err.code(),
            message: err.to_string(),
        });
    }

    /// Error entries raised by the walk itself (unlistable directories,
    /// uninspectable entries) rather than by a candidate.
    pub fn subtree_errors(&self) -> u64 {
        self.error_details
            .iter()
            .filter(|d| matches!(d.kind, "subtree_unreadable" | "entry_unreadable"))
            .count() as u64
    }

    /// Overall outcome used for the exit code.
    pub fn success(&self) -> bool {
        self.errors == 0 && !self.aborted
    }
}
