//! Candidate discovery.
//!
//! Depth-first, entries sorted by file name at every level, symlinks never
//! followed. Files directly in root are not candidates. Unreadable directories
//! surface as events so the caller can record them and carry on.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// One item produced by the walk.
#[derive(Debug)]
pub enum WalkEvent {
    /// A file (or non-directory symlink) somewhere inside a subdirectory of root.
    Candidate(PathBuf),
    /// A directory that could not be listed; nothing below it was visited.
    Unreadable { path: PathBuf, error: io::Error },
    /// A single entry whose type could not be determined; it was not considered.
    EntryFailed { path: PathBuf, error: io::Error },
}

/// Lazy, single-pass iterator over candidates below `root`.
pub struct Walker {
    root: PathBuf,
    inner: walkdir::IntoIter,
}

impl Walker {
    pub fn new(root: &Path) -> Self {
        let inner = WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();
        Self {
            root: root.to_path_buf(),
            inner,
        }
    }
}

impl Walker {
    /// Directory listing failures (and loops) lose a subtree; anything else
    /// loses one entry.
    fn walk_error(&self, err: walkdir::Error) -> WalkEvent {
        let path = err
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root.clone());
        let is_loop = err.loop_ancestor().is_some();
        let error = err
            .into_io_error()
            .unwrap_or_else(|| io::Error::other("filesystem loop detected"));
        if is_loop || is_directory(&path) {
            debug!(path = %path.display(), error = %error, "directory not readable; skipping subtree");
            WalkEvent::Unreadable { path, error }
        } else {
            debug!(path = %path.display(), error = %error, "entry could not be inspected");
            WalkEvent::EntryFailed { path, error }
        }
    }
}

fn is_directory(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|m| m.is_dir())
}

impl Iterator for Walker {
    type Item = WalkEvent;

    fn next(&mut self) -> Option<WalkEvent> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(err) => return Some(self.walk_error(err)),
            };

            // Root itself, and the files already sitting in it.
            if entry.depth() == 0 {
                continue;
            }
            let ftype = entry.file_type();
            if ftype.is_dir() {
                trace!(dir = %entry.path().display(), "descending");
                continue;
            }
            if entry.depth() == 1 {
                continue;
            }

            if ftype.is_file() {
                return Some(WalkEvent::Candidate(entry.into_path()));
            }
            if ftype.is_symlink() {
                // Links to directories are leaves we neither descend nor move.
                let points_at_dir = fs::metadata(entry.path()).map(|m| m.is_dir()).unwrap_or(false);
                if points_at_dir {
                    debug!(link = %entry.path().display(), "ignoring symlink to directory");
                    continue;
                }
                return Some(WalkEvent::Candidate(entry.into_path()));
            }

            debug!(path = %entry.path().display(), "ignoring special file");
        }
    }
}
