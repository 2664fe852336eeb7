//! Moving one candidate into root.
//! Attempts an atomic rename; across filesystems, falls back to safe copy+rename
//! and then removes the source.

use anyhow::{bail, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

use super::atomic::try_atomic_move;
use super::copy::safe_copy_and_rename;
use super::helpers::io_error_with_help;
use super::metadata::preserve_metadata;
use super::util::{is_cross_device, occupied};

/// Per-move switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOptions {
    /// Replace whatever is at `dest` (overwrite policy).
    pub replace: bool,
    /// Copy timestamps and permissions if the move had to copy bytes.
    pub preserve_metadata: bool,
}

/// How the file got there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMethod {
    Renamed,
    Copied,
}

/// Move `src` to `dest`.
///
/// Unless `opts.replace` is set, `dest` is re-checked right before the rename
/// and the move is refused if something appeared there.
pub fn move_file(src: &Path, dest: &Path, opts: MoveOptions) -> Result<MoveMethod> {
    if !opts.replace && occupied(dest) {
        bail!("destination '{}' appeared before the move; refusing to overwrite", dest.display());
    }

    let err = match try_atomic_move(src, dest, opts.replace) {
        Ok(()) => {
            debug!(src = %src.display(), dest = %dest.display(), "renamed atomically");
            return Ok(MoveMethod::Renamed);
        }
        Err(e) => e,
    };

    if !is_cross_device(&err) {
        return Err(io_error_with_help("move into root", dest)(err));
    }

    let lmeta = fs::symlink_metadata(src).map_err(io_error_with_help("stat source", src))?;
    if lmeta.file_type().is_symlink() {
        bail!(
            "cannot move symlink '{}' across filesystems without following it",
            src.display()
        );
    }

    warn!(src = %src.display(), dest = %dest.display(), "cross-filesystem move; copying instead");
    safe_copy_and_rename(src, dest, opts.replace)?;
    if opts.preserve_metadata {
        preserve_metadata(dest, &lmeta);
    }
    fs::remove_file(src).map_err(io_error_with_help("remove original after copy", src))?;
    Ok(MoveMethod::Copied)
}

/// Dry-run counterpart of [`move_file`]: fail the way the move would, touching nothing.
///
/// Covers what can be seen up front: a vanished source, something appearing at
/// `dest`, parent directories we may not write to, and a directory in the way
/// of an overwrite.
pub fn check_move(src: &Path, dest: &Path, opts: MoveOptions) -> Result<()> {
    if let Err(e) = fs::symlink_metadata(src) {
        return Err(io_error_with_help("move into root", dest)(e));
    }
    if !opts.replace && occupied(dest) {
        bail!("destination '{}' appeared before the move; refusing to overwrite", dest.display());
    }

    #[cfg(unix)]
    for dir in [src.parent(), dest.parent()].into_iter().flatten() {
        if let Err(e) = super::util::dir_writable(dir) {
            return Err(io_error_with_help("move into root", dest)(e));
        }
    }

    if opts.replace && fs::symlink_metadata(dest).is_ok_and(|m| m.is_dir()) {
        return Err(io_error_with_help("move into root", dest)(is_a_directory()));
    }
    Ok(())
}

fn is_a_directory() -> io::Error {
    #[cfg(unix)]
    {
        io::Error::from_raw_os_error(libc::EISDIR)
    }
    #[cfg(not(unix))]
    {
        io::Error::from(io::ErrorKind::IsADirectory)
    }
}
