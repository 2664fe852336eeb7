//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - --interactive is a shorthand for --policy interactive.
//! - --debug is a shorthand for --log-level debug.
//! - A missing ROOT is asked for on the terminal, together with the policy when
//!   none was given (see `ask_root`, `ask_policy`).

use clap::{Parser, ValueHint};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::types::{Config, LogLevel};
use crate::config::{ENV_LOG_FILE, ENV_LOG_LEVEL, ENV_POLICY};
use crate::policy::DuplicatePolicy;

/// Pull files out of nested subdirectories into ROOT.
/// CLI flags override environment variables, which override defaults.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Gather files from nested subdirectories into one folder (Rust)"
)]
pub struct Args {
    /// Directory to consolidate into. Asked for on the terminal if omitted.
    #[arg(value_name = "ROOT", value_hint = ValueHint::DirPath)]
    pub root: Option<PathBuf>,

    /// Duplicate policy: skip, counter, timestamp, overwrite, interactive (or S/R/T/O/I).
    #[arg(
        long,
        short = 'p',
        env = ENV_POLICY,
        value_parser = clap::value_parser!(DuplicatePolicy),
        help = "Duplicate policy: skip, counter, timestamp, overwrite, interactive"
    )]
    pub policy: Option<DuplicatePolicy>,

    /// Ask for each duplicate (shorthand for `--policy interactive`).
    #[arg(short = 'i', long, help = "Ask what to do for each duplicate")]
    pub interactive: bool,

    /// Dry-run: log actions but do not modify the filesystem.
    #[arg(long, help = "Show what would be done, but do not move anything")]
    pub dry_run: bool,

    /// Preserve timestamps and permissions when a move has to copy.
    #[arg(
        long,
        help = "Keep timestamps and permissions when a move falls back to copying"
    )]
    pub preserve_metadata: bool,

    /// How many numbered names to try before giving up on a file.
    #[arg(long, value_name = "N", help = "Upper bound for the numbered-name search")]
    pub counter_limit: Option<u64>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, env = ENV_LOG_LEVEL, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Also write logs to this file.
    #[arg(long, env = ENV_LOG_FILE, value_hint = ValueHint::FilePath, help = "Append logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,

    /// Print the run statistics as JSON instead of the summary lines.
    #[arg(long, help = "Print the final statistics as JSON")]
    pub summary_json: bool,
}

impl Args {
    /// Root as given on the command line, with stray shell quoting removed.
    pub fn resolved_root(&self) -> Option<PathBuf> {
        self.root.as_deref().map(Self::sanitize_path)
    }

    #[inline]
    fn sanitize_path(p: &Path) -> PathBuf {
        sanitize_str(&p.to_string_lossy())
    }

    /// Policy from flags. Precedence: --interactive > --policy / CONSOLIDATE_POLICY.
    pub fn effective_policy(&self) -> Option<DuplicatePolicy> {
        if self.interactive {
            return Some(DuplicatePolicy::Interactive);
        }
        self.policy
    }

    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = self.resolved_root() {
            cfg.root = root;
        }
        if let Some(policy) = self.effective_policy() {
            cfg.policy = policy;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(limit) = self.counter_limit {
            cfg.counter_limit = limit.max(1);
        }
        if self.log_file.is_some() {
            cfg.log_file = self.log_file.clone();
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
        if self.preserve_metadata {
            cfg.preserve_metadata = true;
        }
    }
}

/// Trim surrounding single/double quotes if the user invoked with quotes in PowerShell or CMD,
/// plus one trailing separator.
fn sanitize_str(s: &str) -> PathBuf {
    let trimmed = s.trim();
    let mut inner = if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.trim_matches(|c| c == '\'' || c == '"').to_string()
    };

    // Avoid stripping root "/" inadvertently.
    if (inner.ends_with('\\') || inner.ends_with('/')) && inner.len() > 1 {
        inner.pop();
    }

    PathBuf::from(inner)
}

/// Ask for the root directory. `None` on EOF or an empty answer.
pub fn ask_root<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Option<PathBuf>> {
    write!(output, "Enter the absolute path to the root folder: ")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let path = sanitize_str(&line);
    Ok((!path.as_os_str().is_empty()).then_some(path))
}

/// Ask how duplicates should be handled. An empty answer picks Skip; EOF gives `None`.
pub fn ask_policy<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
) -> io::Result<Option<DuplicatePolicy>> {
    loop {
        write!(
            output,
            "How should duplicates be handled?\n[S]kip\n[R]ename with counter\n[T]imestamp rename\n[O]verwrite\n[I]nteractive (ask each time)\nYour choice [S/R/T/O/I, default S]: "
        )?;
        output.flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        if line.trim().is_empty() {
            return Ok(Some(DuplicatePolicy::Skip));
        }
        match DuplicatePolicy::parse(&line) {
            Some(p) => return Ok(Some(p)),
            None => writeln!(output, "Invalid choice. Please try again.")?,
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
