//! Safe copy-and-rename, the fallback when a plain rename crosses filesystems:
//! - Copies to a hidden temp file in the destination directory (fsynced)
//! - Atomically renames temp -> dest, so readers never see a partial file
//! - Removes the temp file if anything fails

use anyhow::{anyhow, Result};
use std::fs;
use std::path::Path;

use super::atomic::try_atomic_move;
use super::helpers::io_error_with_help;
use super::{io_copy, util};

/// Copy `src` into place at `dest` without exposing a partially written file.
pub fn safe_copy_and_rename(src: &Path, dest: &Path, replace: bool) -> Result<()> {
    let dest_dir = dest
        .parent()
        .ok_or_else(|| anyhow!("destination has no parent: {}", dest.display()))?;

    let tmp_path = util::unique_temp_path(dest_dir);

    if let Err(e) = io_copy::copy_streaming(src, &tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("copy to temporary file", &tmp_path)(e));
    }

    if let Err(e) = try_atomic_move(&tmp_path, dest, replace) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error_with_help("rename temporary file into place", dest)(e));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn leftovers(dir: &Path) -> Vec<String> {
        fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .filter(|n| n.starts_with(".consolidate.") && n.ends_with(".tmp"))
            .collect()
    }

    #[test]
    fn creates_destination_and_cleans_tmp() {
        let td = tempdir().unwrap();
        let src = td.path().join("src.txt");
        fs::write(&src, "hello world").unwrap();
        let dest_dir = td.path().join("root");
        fs::create_dir_all(&dest_dir).unwrap();
        let dest = dest_dir.join("dest.txt");

        safe_copy_and_rename(&src, &dest, false).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "hello world");
        assert!(src.exists(), "copy leaves the source for the caller to remove");
        assert!(leftovers(&dest_dir).is_empty());
    }

    #[test]
    fn replaces_existing_destination_when_asked() {
        let td = tempdir().unwrap();
        let src = td.path().join("new.txt");
        fs::write(&src, "new content").unwrap();
        let dest = td.path().join("old.txt");
        fs::write(&dest, "old").unwrap();

        safe_copy_and_rename(&src, &dest, true).unwrap();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "new content");
    }

    #[test]
    fn missing_source_leaves_no_temp() {
        let td = tempdir().unwrap();
        let err = safe_copy_and_rename(&td.path().join("nope"), &td.path().join("d"), false)
            .unwrap_err();
        assert!(err.to_string().contains("copy to temporary file"));
        assert!(leftovers(td.path()).is_empty());
    }
}
