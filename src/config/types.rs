//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::COUNTER_LIMIT_DEFAULT;
use crate::policy::DuplicatePolicy;

/// Program-defined verbosity levels exposed to users.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Runtime configuration for one consolidation run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory files are gathered into; never created by us
    pub root: PathBuf,
    /// What to do when a name is already taken in root
    pub policy: DuplicatePolicy,
    /// If true, report what would happen but do not modify the filesystem
    pub dry_run: bool,
    /// If true, copy timestamps and permissions when a move falls back to copying
    pub preserve_metadata: bool,
    /// How many numbered names to try before recording a failure
    pub counter_limit: u64,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            policy: DuplicatePolicy::default(),
            dry_run: false,
            preserve_metadata: false,
            counter_limit: COUNTER_LIMIT_DEFAULT,
            log_level: LogLevel::Normal,
            log_file: None,
        }
    }
}

impl Config {
    /// Construct a Config for `root` with the given policy; other fields use defaults.
    pub fn new(root: impl Into<PathBuf>, policy: DuplicatePolicy) -> Self {
        Self {
            root: root.into(),
            policy,
            ..Default::default()
        }
    }
}
