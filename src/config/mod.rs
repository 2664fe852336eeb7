//! Config module.
//! Provides configuration types, root validation, and path safety helpers.
//! There is no config file: values come from CLI flags, environment, or defaults.

pub mod paths;
pub mod types;
mod validate;

pub use paths::path_has_symlink_ancestor;
pub use types::{Config, LogLevel};

/// Upper bound on the numbered-name search before giving up on a file.
pub const COUNTER_LIMIT_DEFAULT: u64 = 1_000_000;

/// Environment variables read (through clap) when the matching flag is absent.
pub const ENV_POLICY: &str = "CONSOLIDATE_POLICY";
pub const ENV_LOG_LEVEL: &str = "CONSOLIDATE_LOG_LEVEL";
pub const ENV_LOG_FILE: &str = "CONSOLIDATE_LOG_FILE";
