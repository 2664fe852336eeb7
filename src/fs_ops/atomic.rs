//! Atomic rename helper.
//! - Without `replace`, an occupied destination is an `AlreadyExists` error.
//!   Linux enforces this in the kernel (`RENAME_NOREPLACE`); elsewhere the
//!   destination is checked right before a plain rename.
//! - On Windows, removes an existing destination first when replacing (rename there doesn't overwrite).
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::io;
use std::path::Path;

use super::util::occupied;

/// Rename `src` onto `dst`. `replace` must be set for an intentional overwrite.
pub(super) fn try_atomic_move(src: &Path, dst: &Path, replace: bool) -> io::Result<()> {
    if replace {
        #[cfg(windows)]
        match fs::remove_file(dst) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        fs::rename(src, dst)?;
    } else {
        rename_noreplace(src, dst)?;
    }

    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        // Don't turn a successful rename into a failure.
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn rename_noreplace(src: &Path, dst: &Path) -> io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let c_src = CString::new(src.as_os_str().as_bytes()).map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;
    let c_dst = CString::new(dst.as_os_str().as_bytes()).map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;
    // SAFETY: both pointers are valid NUL-terminated strings for the duration of the call.
    let rc = unsafe {
        libc::renameat2(
            libc::AT_FDCWD,
            c_src.as_ptr(),
            libc::AT_FDCWD,
            c_dst.as_ptr(),
            libc::RENAME_NOREPLACE,
        )
    };
    if rc == 0 {
        return Ok(());
    }
    let err = io::Error::last_os_error();
    match err.raw_os_error() {
        // Kernel or filesystem without the flag.
        Some(libc::ENOSYS) | Some(libc::EINVAL) => checked_rename(src, dst),
        _ => Err(err),
    }
}

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
fn rename_noreplace(src: &Path, dst: &Path) -> io::Result<()> {
    checked_rename(src, dst)
}

fn checked_rename(src: &Path, dst: &Path) -> io::Result<()> {
    if occupied(dst) {
        return Err(io::Error::from(io::ErrorKind::AlreadyExists));
    }
    fs::rename(src, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn refuses_occupied_destination_without_replace() {
        let td = tempdir().unwrap();
        let src = td.path().join("incoming.txt");
        let dst = td.path().join("existing.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();

        let err = try_atomic_move(&src, &dst, false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
        assert_eq!(fs::read_to_string(&dst).unwrap(), "old");
        assert_eq!(fs::read_to_string(&src).unwrap(), "new");
    }

    #[test]
    fn replaces_when_asked() {
        let td = tempdir().unwrap();
        let src = td.path().join("incoming.txt");
        let dst = td.path().join("existing.txt");
        fs::write(&src, "new").unwrap();
        fs::write(&dst, "old").unwrap();

        try_atomic_move(&src, &dst, true).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");
        assert!(!src.exists());
    }

    #[test]
    fn free_destination_is_a_plain_rename() {
        let td = tempdir().unwrap();
        let src = td.path().join("a.txt");
        let dst = td.path().join("b.txt");
        fs::write(&src, "x").unwrap();

        try_atomic_move(&src, &dst, false).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "x");
        assert!(!src.exists());
    }
}
