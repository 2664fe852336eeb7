//! Destination resolution: where does an incoming file land?
//!
//! Existence is checked against the live directory at the moment of each
//! decision, because earlier moves in the same run change what is taken.
//! In dry-run mode nothing moves, so names handed out earlier in the run are
//! remembered and treated as taken too.

use std::collections::HashSet;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::errors::ConsolidateError;
use crate::policy::{Decision, DuplicatePolicy};
use crate::prompt::DuplicatePrompt;

use super::naming::{counter_name, timestamp_counter_name, timestamp_name, timestamp_now};
use super::util::{occupied, same_file};

/// Why a candidate stays where it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Name taken and the policy (or the prompt) said skip.
    Duplicate,
    /// The destination already is this very file.
    SameFile,
}

/// Outcome of resolving one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Move to this free path.
    ProceedAs(PathBuf),
    /// Replace the existing file at this path.
    Overwrite(PathBuf),
    Skip(SkipReason),
    /// The interactive prompt failed; stop the run.
    AbortRun(String),
}

/// Resolves destinations inside one root for the length of a run.
#[derive(Debug)]
pub struct Resolver {
    root: PathBuf,
    counter_limit: u64,
    /// Destinations handed out during a dry run.
    claimed: HashSet<PathBuf>,
}

impl Resolver {
    pub fn new(root: &Path, counter_limit: u64) -> Self {
        Self {
            root: root.to_path_buf(),
            counter_limit,
            claimed: HashSet::new(),
        }
    }

    /// Mark `dest` as taken without touching the disk (dry run).
    pub fn claim(&mut self, dest: PathBuf) {
        self.claimed.insert(dest);
    }

    fn taken(&self, p: &Path) -> bool {
        self.claimed.contains(p) || occupied(p)
    }

    /// Decide where `src` goes under `policy`.
    ///
    /// `prompt` is only consulted for `DuplicatePolicy::Interactive`, and only
    /// when the name is actually taken.
    pub fn resolve(
        &mut self,
        src: &Path,
        policy: DuplicatePolicy,
        prompt: Option<&mut (dyn DuplicatePrompt + '_)>,
    ) -> Result<Resolution, ConsolidateError> {
        let name = src.file_name().ok_or_else(|| ConsolidateError::MoveFailed {
            path: src.to_path_buf(),
            message: "source has no file name".into(),
        })?;
        let dest = self.root.join(name);

        if !self.taken(&dest) {
            return Ok(Resolution::ProceedAs(dest));
        }
        if same_file(src, &dest) {
            debug!(src = %src.display(), dest = %dest.display(), "source already is the destination");
            return Ok(Resolution::Skip(SkipReason::SameFile));
        }

        let decision = match policy.as_decision() {
            Some(d) => d,
            None => {
                let prompt = prompt.ok_or(ConsolidateError::MissingPrompt)?;
                match prompt.decide(&dest, src) {
                    Ok(d) => {
                        debug!(src = %src.display(), decision = ?d, "prompt answered");
                        d
                    }
                    Err(e) => return Ok(Resolution::AbortRun(e.to_string())),
                }
            }
        };

        match decision {
            Decision::Skip => Ok(Resolution::Skip(SkipReason::Duplicate)),
            Decision::Overwrite => Ok(Resolution::Overwrite(dest)),
            Decision::RenameWithCounter => self
                .first_free(&dest, |n| counter_name(name, n))
                .map(Resolution::ProceedAs),
            Decision::RenameWithTimestamp => self.timestamped(&dest, name).map(Resolution::ProceedAs),
        }
    }

    /// Smallest n in 1..=counter_limit whose generated name is free.
    fn first_free(
        &self,
        dest: &Path,
        make: impl Fn(u64) -> OsString,
    ) -> Result<PathBuf, ConsolidateError> {
        for n in 1..=self.counter_limit {
            let candidate = self.root.join(make(n));
            if !self.taken(&candidate) {
                if n > 1 {
                    trace!(dest = %candidate.display(), tries = n, "found free numbered name");
                }
                return Ok(candidate);
            }
        }
        Err(ConsolidateError::NameResolutionExhausted {
            path: dest.to_path_buf(),
            limit: self.counter_limit,
        })
    }

    fn timestamped(&self, dest: &Path, name: &OsStr) -> Result<PathBuf, ConsolidateError> {
        let ts = timestamp_now();
        let candidate = self.root.join(timestamp_name(name, &ts));
        if !self.taken(&candidate) {
            return Ok(candidate);
        }
        debug!(dest = %candidate.display(), "timestamped name taken; adding a counter");
        self.first_free(dest, |n| timestamp_counter_name(name, &ts, n))
    }
}
