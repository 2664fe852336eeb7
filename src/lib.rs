//! Core library for `consolidate`.
//!
//! Pulls every file out of the nested subdirectories of a root directory and
//! into the root itself, resolving name clashes with a `DuplicatePolicy`.
//! The binary is a thin shell over [`consolidate()`]: it builds a `Config`,
//! optionally supplies a terminal prompt, and prints the returned `RunStats`.

pub mod cli;
pub mod config;
pub mod consolidate;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod policy;
pub mod prompt;
pub mod stats;

pub use config::{path_has_symlink_ancestor, Config, LogLevel};
pub use consolidate::consolidate;
pub use errors::ConsolidateError;
pub use policy::{Decision, DuplicatePolicy};
pub use prompt::{DuplicatePrompt, StdinPrompt};
pub use stats::{ErrorDetail, RunStats};

/// Convenience re-exports for embedding and tests.
pub mod prelude {
    pub use crate::config::{Config, LogLevel};
    pub use crate::consolidate::consolidate;
    pub use crate::errors::ConsolidateError;
    pub use crate::policy::{Decision, DuplicatePolicy};
    pub use crate::prompt::{DuplicatePrompt, StdinPrompt};
    pub use crate::stats::{ErrorDetail, RunStats};
}
