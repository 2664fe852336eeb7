use clap::Parser;
use consolidate::cli::Args;
use consolidate::config::types::{Config, LogLevel};
use consolidate::DuplicatePolicy;
use std::path::PathBuf;

#[test]
fn positional_root_is_sanitized() {
    let args = Args::parse_from(["consolidate", "'/tmp/photos/'"]);
    assert_eq!(args.resolved_root(), Some(PathBuf::from("/tmp/photos")));
}

#[test]
fn effective_log_level_precedence() {
    let args = Args::parse_from(["consolidate", "--debug", "--log-level", "quiet"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Debug)); // --debug wins

    let args = Args::parse_from(["consolidate", "--log-level", "info"]);
    assert_eq!(args.effective_log_level(), Some(LogLevel::Info));

    let args = Args::parse_from(["consolidate", "--log-level", "shouty"]);
    assert_eq!(args.effective_log_level(), None);
}

#[test]
fn apply_overrides_sets_flags() {
    let args = Args::parse_from([
        "consolidate",
        "/data",
        "--policy",
        "timestamp",
        "--log-level",
        "info",
        "--log-file",
        "/var/log/consolidate.log",
        "--dry-run",
        "--preserve-metadata",
        "--counter-limit",
        "50",
    ]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.root, PathBuf::from("/data"));
    assert_eq!(cfg.policy, DuplicatePolicy::RenameWithTimestamp);
    assert_eq!(cfg.log_level, LogLevel::Info);
    assert_eq!(cfg.log_file, Some(PathBuf::from("/var/log/consolidate.log")));
    assert_eq!(cfg.counter_limit, 50);
    assert!(cfg.dry_run);
    assert!(cfg.preserve_metadata);
}

#[test]
fn unset_flags_leave_defaults() {
    let args = Args::parse_from(["consolidate", "--policy", "skip"]);
    let mut cfg = Config::default();
    args.apply_overrides(&mut cfg);
    assert_eq!(cfg.root, PathBuf::from("."));
    assert_eq!(cfg.policy, DuplicatePolicy::Skip);
    assert!(!cfg.dry_run);
    assert_eq!(cfg.log_file, None);
}
