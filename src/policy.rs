//! Duplicate-handling policies.
//! - DuplicatePolicy is chosen once per run.
//! - Decision is what an interactive prompt answers for one colliding file.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// How to treat an incoming file whose name already exists in root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Leave the incoming file where it is.
    #[default]
    Skip,
    /// Land at "stem(n).ext" with the smallest free n >= 1.
    RenameWithCounter,
    /// Land at "stem_YYYYMMDD_HHMMSS.ext", counter-suffixed if that is taken too.
    RenameWithTimestamp,
    /// Replace the existing file. Its previous content is lost.
    Overwrite,
    /// Ask a prompt for each collision.
    Interactive,
}

impl DuplicatePolicy {
    /// Parse long names or single-letter shortcuts (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip" | "s" => Some(DuplicatePolicy::Skip),
            "counter" | "rename" | "r" => Some(DuplicatePolicy::RenameWithCounter),
            "timestamp" | "t" => Some(DuplicatePolicy::RenameWithTimestamp),
            "overwrite" | "o" => Some(DuplicatePolicy::Overwrite),
            "interactive" | "i" => Some(DuplicatePolicy::Interactive),
            _ => None,
        }
    }

    /// The fixed per-file decision this policy stands for; `None` for Interactive.
    pub fn as_decision(self) -> Option<Decision> {
        match self {
            DuplicatePolicy::Skip => Some(Decision::Skip),
            DuplicatePolicy::RenameWithCounter => Some(Decision::RenameWithCounter),
            DuplicatePolicy::RenameWithTimestamp => Some(Decision::RenameWithTimestamp),
            DuplicatePolicy::Overwrite => Some(Decision::Overwrite),
            DuplicatePolicy::Interactive => None,
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DuplicatePolicy::Skip => "skip",
            DuplicatePolicy::RenameWithCounter => "counter",
            DuplicatePolicy::RenameWithTimestamp => "timestamp",
            DuplicatePolicy::Overwrite => "overwrite",
            DuplicatePolicy::Interactive => "interactive",
        };
        f.write_str(s)
    }
}

impl FromStr for DuplicatePolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| {
            format!("invalid duplicate policy: '{s}' (expected skip, counter, timestamp, overwrite or interactive)")
        })
    }
}

/// One-off answer for a single collision. Never persists to later files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Skip,
    RenameWithCounter,
    RenameWithTimestamp,
    Overwrite,
}

impl Decision {
    /// Map the prompt letters S/R/T/O (case-insensitive, surrounding whitespace ignored).
    pub fn from_letter(s: &str) -> Option<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "S" => Some(Decision::Skip),
            "R" => Some(Decision::RenameWithCounter),
            "T" => Some(Decision::RenameWithTimestamp),
            "O" => Some(Decision::Overwrite),
            _ => None,
        }
    }
}
