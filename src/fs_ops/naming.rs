//! Collision-free name building.
//!
//! Names are split into stem and extension at the last dot (a leading dot does
//! not count), and every suffix goes between the two:
//! - "doc.pdf"        -> "doc(1).pdf", "doc_20240101_120000.pdf"
//! - "README"         -> "README(1)"
//! - ".env"           -> ".env(1)"
//! - "archive.tar.gz" -> "archive.tar(1).gz"
//!
//! Non-UTF8 names are preserved via OsString.

use chrono::Local;
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// strftime pattern for timestamp renames.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// Conservative filename limits (bytes/characters, platform-specific and approximate).
#[cfg(windows)]
const MAX_FILENAME_LEN: usize = 240; // leave headroom for legacy MAX_PATH
#[cfg(not(windows))]
const MAX_FILENAME_LEN: usize = 255; // typical POSIX/EXT limits

/// Split a file name into (stem, extension-without-dot).
pub fn split_name(name: &OsStr) -> (OsString, Option<OsString>) {
    let p = Path::new(name);
    let stem = p
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| name.to_os_string());
    let ext = p.extension().map(|e| e.to_os_string());
    (stem, ext)
}

/// "stem(n).ext"
pub fn counter_name(name: &OsStr, n: u64) -> OsString {
    let (stem, ext) = split_name(name);
    build_name_with_suffix(&stem, ext.as_deref(), &format!("({n})"))
}

/// "stem_<timestamp>.ext"
pub fn timestamp_name(name: &OsStr, timestamp: &str) -> OsString {
    let (stem, ext) = split_name(name);
    build_name_with_suffix(&stem, ext.as_deref(), &format!("_{timestamp}"))
}

/// "stem_<timestamp>(n).ext", used when two files land in the same second.
pub fn timestamp_counter_name(name: &OsStr, timestamp: &str, n: u64) -> OsString {
    let (stem, ext) = split_name(name);
    build_name_with_suffix(&stem, ext.as_deref(), &format!("_{timestamp}({n})"))
}

/// Wall-clock capture in `TIMESTAMP_FORMAT`.
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// Measure the approximate length of an OsStr for filename budgeting.
#[cfg(unix)]
fn name_len_units(s: &OsStr) -> usize {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().len()
}

#[cfg(not(unix))]
fn name_len_units(s: &OsStr) -> usize {
    s.to_string_lossy().len()
}

/// Assemble `stem + suffix + ["." + ext]`, shortening the stem (never the
/// suffix or extension) when the result would exceed MAX_FILENAME_LEN.
fn build_name_with_suffix(stem: &OsStr, ext: Option<&OsStr>, suffix: &str) -> OsString {
    let mut overhead = name_len_units(OsStr::new(suffix));
    let mut ext_part = OsString::new();
    if let Some(e) = ext {
        overhead += 1 + name_len_units(e);
        ext_part.push(".");
        ext_part.push(e);
    }

    let mut stem_os = stem.to_os_string();
    if name_len_units(&stem_os) + overhead > MAX_FILENAME_LEN {
        let budget = MAX_FILENAME_LEN.saturating_sub(overhead).max(1);
        stem_os = truncate_stem(stem, budget);
    }

    let mut new_name = stem_os;
    new_name.push(suffix);
    new_name.push(&ext_part);
    new_name
}

/// Cut `stem` down to at most `budget` units, on a char boundary when UTF-8.
fn truncate_stem(stem: &OsStr, budget: usize) -> OsString {
    if let Some(s) = stem.to_str() {
        let mut acc = String::new();
        for ch in s.chars() {
            if acc.len() + ch.len_utf8() > budget {
                break;
            }
            acc.push(ch);
        }
        if acc.is_empty() {
            acc.push('f');
        }
        return OsString::from(acc);
    }

    #[cfg(unix)]
    {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};
        let bytes = stem.as_bytes();
        OsString::from_vec(bytes[..bytes.len().min(budget)].to_vec())
    }
    #[cfg(not(unix))]
    {
        let lossy = stem.to_string_lossy();
        truncate_stem(OsStr::new(lossy.as_ref()), budget)
    }
}
