//! I/O error enrichment.
//!
//! Turns a bare io::Error into "op 'path': error; hint [os code: N]" so the
//! per-file error entries in the run summary are actionable on their own.
//!
//! Usage:
//!   fs::rename(src, dest).map_err(io_error_with_help("move into root", dest))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Platform-aware hint for a raw OS error code, if we have one.
fn hint_for_code(code: i32) -> Option<&'static str> {
    #[cfg(unix)]
    {
        match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; atomic rename not possible"),
            libc::EBUSY => Some("resource busy; ensure no other process is using the file"),
            libc::ENOENT => Some("path not found; it may have been moved or deleted during the run"),
            libc::EEXIST => Some("already exists"),
            libc::EISDIR => Some("destination is a directory"),
            libc::ENOTEMPTY => Some("destination is a non-empty directory"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::EROFS => Some("read-only filesystem; cannot write here"),
            libc::ELOOP => Some("too many symbolic link levels; possible symlink cycle"),
            libc::ENAMETOOLONG => Some("filename or path too long"),
            libc::EMFILE | libc::ENFILE => Some("too many open files"),
            _ => None,
        }
    }
    #[cfg(windows)]
    {
        match code {
            5 => Some("access denied; check permissions"),          // ERROR_ACCESS_DENIED
            17 => Some("not same device; cross-filesystem move"),   // ERROR_NOT_SAME_DEVICE
            32 => Some("sharing violation; file is in use"),        // ERROR_SHARING_VIOLATION
            2 | 3 => Some("path not found"),                        // FILE/PATH NOT FOUND
            80 | 183 => Some("already exists"),                     // ERROR_FILE_EXISTS / ALREADY_EXISTS
            112 => Some("insufficient disk space"),                 // ERROR_DISK_FULL
            19 => Some("write protected / read-only media"),        // ERROR_WRITE_PROTECT
            206 => Some("filename or path too long"),               // ERROR_FILENAME_EXCED_RANGE
            _ => None,
        }
    }
    #[cfg(not(any(unix, windows)))]
    {
        let _ = code;
        None
    }
}

fn hint_for_kind(kind: io::ErrorKind) -> Option<&'static str> {
    match kind {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found"),
        io::ErrorKind::AlreadyExists => Some("already exists"),
        io::ErrorKind::UnexpectedEof => Some("source shrank while copying"),
        _ => None,
    }
}

/// Format a human-friendly message with op/path plus platform-aware hints.
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    let hint = match e.raw_os_error() {
        Some(code) => hint_for_code(code),
        None => hint_for_kind(e.kind()),
    };
    if let Some(h) = hint {
        msg.push_str("; ");
        msg.push_str(h);
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Returns a closure suitable for `.map_err(...)` that converts io::Error -> anyhow::Error.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn permission_denied_gets_hint_and_code() {
        let e = io::Error::from_raw_os_error(libc::EACCES);
        let msg = build_message("move into root", Path::new("/r/a.txt"), &e);
        assert!(msg.starts_with("move into root '/r/a.txt'"));
        assert!(msg.contains("check ownership"));
        assert!(msg.contains(&format!("[os code: {}]", libc::EACCES)));
    }

    #[test]
    fn kind_only_errors_still_get_hints() {
        let e = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = io_error_with_help("stat", Path::new("x"))(e);
        let msg = err.to_string();
        assert!(msg.contains("gone"));
        assert!(msg.contains("path not found"));
        assert!(!msg.contains("os code"));
    }
}
