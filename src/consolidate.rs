//! The consolidation run: walk below root, resolve each candidate, move it.
//!
//! Everything after root validation is per-file: a failure is recorded in
//! `RunStats` and the walk carries on. The only early stop is a failed
//! interactive prompt.

use std::ops::ControlFlow;
use std::path::Path;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::errors::ConsolidateError;
use crate::fs_ops::{check_move, move_file, MoveOptions, Resolution, Resolver, SkipReason, WalkEvent, Walker};
use crate::policy::DuplicatePolicy;
use crate::prompt::DuplicatePrompt;
use crate::stats::RunStats;

/// Gather every file below `config.root` into `config.root`.
///
/// Returns `Err` only when the run cannot start: the root is invalid, or the
/// policy is interactive and no prompt was supplied. Nothing has been touched
/// in either case.
pub fn consolidate(
    config: &Config,
    mut prompt: Option<&mut dyn DuplicatePrompt>,
) -> Result<RunStats, ConsolidateError> {
    let root = config.validate_root()?;
    if config.policy == DuplicatePolicy::Interactive && prompt.is_none() {
        return Err(ConsolidateError::MissingPrompt);
    }

    info!(
        root = %root.display(),
        policy = %config.policy,
        dry_run = config.dry_run,
        "Starting consolidation"
    );

    let mut stats = RunStats::new();
    let mut resolver = Resolver::new(&root, config.counter_limit);

    for event in Walker::new(&root) {
        match event {
            WalkEvent::Unreadable { path, error } => {
                warn!(path = %path.display(), error = %error, "Skipping unreadable subtree");
                let err = ConsolidateError::SubtreeUnreadable {
                    path: path.clone(),
                    source: error,
                };
                stats.record_error(&path, &err);
            }
            WalkEvent::EntryFailed { path, error } => {
                warn!(path = %path.display(), error = %error, "Skipping entry that could not be inspected");
                let err = ConsolidateError::EntryUnreadable {
                    path: path.clone(),
                    source: error,
                };
                stats.record_error(&path, &err);
            }
            WalkEvent::Candidate(src) => {
                stats.record_candidate();
                let flow = process_file(config, &mut resolver, &src, prompt.as_deref_mut(), &mut stats);
                if flow.is_break() {
                    stats.aborted = true;
                    break;
                }
            }
        }
    }

    info!(
        candidates = stats.candidates,
        moved = stats.moved,
        skipped = stats.skipped,
        errors = stats.errors,
        aborted = stats.aborted,
        "Consolidation finished"
    );
    Ok(stats)
}

/// Resolve and move one candidate; every path out of here bumps exactly one counter.
fn process_file(
    config: &Config,
    resolver: &mut Resolver,
    src: &Path,
    prompt: Option<&mut (dyn DuplicatePrompt + '_)>,
    stats: &mut RunStats,
) -> ControlFlow<()> {
    let resolution = match resolver.resolve(src, config.policy, prompt) {
        Ok(r) => r,
        Err(err) => {
            warn!(code = err.code(), src = %src.display(), error = %err, "Could not resolve a destination");
            stats.record_error(src, &err);
            return ControlFlow::Continue(());
        }
    };

    let (dest, replace) = match resolution {
        Resolution::ProceedAs(dest) => (dest, false),
        Resolution::Overwrite(dest) => (dest, true),
        Resolution::Skip(reason) => {
            match reason {
                SkipReason::Duplicate => info!(src = %src.display(), "Skipped duplicate"),
                SkipReason::SameFile => debug!(src = %src.display(), "Skipped; already in place"),
            }
            stats.record_skipped();
            return ControlFlow::Continue(());
        }
        Resolution::AbortRun(reason) => {
            let err = ConsolidateError::PromptFailed(reason);
            error!(code = err.code(), src = %src.display(), error = %err, "Aborting run");
            stats.record_error(src, &err);
            return ControlFlow::Break(());
        }
    };

    let opts = MoveOptions {
        replace,
        preserve_metadata: config.preserve_metadata,
    };

    if config.dry_run {
        match check_move(src, &dest, opts) {
            Ok(()) => {
                info!(src = %src.display(), dest = %dest.display(), overwrite = replace, "Dry-run: would move");
                resolver.claim(dest);
                stats.record_moved();
            }
            Err(e) => record_move_failure(src, &dest, e, stats),
        }
        return ControlFlow::Continue(());
    }

    match move_file(src, &dest, opts) {
        Ok(method) => {
            info!(src = %src.display(), dest = %dest.display(), overwrite = replace, ?method, "Moved");
            stats.record_moved();
        }
        Err(e) => record_move_failure(src, &dest, e, stats),
    }
    ControlFlow::Continue(())
}

fn record_move_failure(src: &Path, dest: &Path, e: anyhow::Error, stats: &mut RunStats) {
    let err = ConsolidateError::MoveFailed {
        path: src.to_path_buf(),
        message: format!("{e:#}"),
    };
    warn!(code = err.code(), src = %src.display(), dest = %dest.display(), error = %err, "Move failed");
    stats.record_error(src, &err);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::Decision;
    use assert_fs::prelude::*;
    use std::fs;

    #[test]
    fn missing_prompt_fails_before_touching_anything() {
        let root = assert_fs::TempDir::new().unwrap();
        root.child("a/x.txt").write_str("x").unwrap();
        let cfg = Config::new(root.path(), DuplicatePolicy::Interactive);
        let err = consolidate(&cfg, None).unwrap_err();
        assert!(matches!(err, ConsolidateError::MissingPrompt));
        assert!(root.child("a/x.txt").path().exists());
        assert!(!root.child("x.txt").path().exists());
    }

    #[test]
    fn dry_run_counts_without_moving() {
        let root = assert_fs::TempDir::new().unwrap();
        root.child("a/doc.pdf").write_str("a").unwrap();
        root.child("b/doc.pdf").write_str("b").unwrap();
        let mut cfg = Config::new(root.path(), DuplicatePolicy::Skip);
        cfg.dry_run = true;

        let stats = consolidate(&cfg, None).unwrap();
        assert_eq!(stats.candidates, 2);
        // The first claims doc.pdf, so the second collides even though nothing moved.
        assert_eq!(stats.moved, 1);
        assert_eq!(stats.skipped, 1);
        assert!(!root.child("doc.pdf").path().exists());
        assert!(root.child("a/doc.pdf").path().exists());
    }

    #[test]
    fn prompt_failure_stops_the_walk() {
        let root = assert_fs::TempDir::new().unwrap();
        root.child("x.txt").write_str("root").unwrap();
        root.child("a/x.txt").write_str("a").unwrap();
        root.child("b/x.txt").write_str("b").unwrap();
        struct Closed {
            calls: usize,
        }
        impl DuplicatePrompt for Closed {
            fn decide(&mut self, _: &Path, _: &Path) -> std::io::Result<Decision> {
                self.calls += 1;
                Err(std::io::Error::other("closed"))
            }
        }
        let mut p = Closed { calls: 0 };

        let cfg = Config::new(root.path(), DuplicatePolicy::Interactive);
        let stats = consolidate(&cfg, Some(&mut p)).unwrap();
        assert!(stats.aborted);
        assert_eq!(stats.candidates, 1);
        assert_eq!(stats.errors, 1);
        assert_eq!(stats.error_details[0].kind, "prompt_failed");
        assert!(!stats.success());
        assert_eq!(p.calls, 1);
        assert_eq!(fs::read_to_string(root.child("x.txt").path()).unwrap(), "root");
        assert!(root.child("b/x.txt").path().exists());
    }
}
