//! Root validation.
//! Verifies the root exists and is a directory, and normalises it, before any mutation.

use std::fs;
use std::path::PathBuf;
use tracing::{debug, error};

use crate::errors::ConsolidateError;

use super::types::Config;

impl Config {
    /// Check `root` and return its canonical form.
    ///
    /// - Missing path or non-directory -> `InvalidRoot`.
    /// - Readability is not checked here; an unreadable root shows up as an
    ///   unreadable subtree during the walk.
    pub fn validate_root(&self) -> Result<PathBuf, ConsolidateError> {
        let root = &self.root;
        let meta = match fs::metadata(root) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                error!(root = %root.display(), "root does not exist");
                return Err(ConsolidateError::invalid_root(root, "does not exist"));
            }
            Err(e) => {
                error!(root = %root.display(), error = %e, "cannot stat root");
                return Err(ConsolidateError::invalid_root(root, e.to_string()));
            }
        };
        if !meta.is_dir() {
            error!(root = %root.display(), "root is not a directory");
            return Err(ConsolidateError::invalid_root(root, "is not a directory"));
        }

        let canonical = dunce::canonicalize(root)
            .map_err(|e| ConsolidateError::invalid_root(root, e.to_string()))?;
        debug!(root = %canonical.display(), "root validated");
        Ok(canonical)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::errors::ConsolidateError;
    use crate::policy::DuplicatePolicy;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn missing_root_is_invalid() {
        let td = tempdir().unwrap();
        let cfg = Config::new(td.path().join("nope"), DuplicatePolicy::Skip);
        let err = cfg.validate_root().unwrap_err();
        assert!(matches!(err, ConsolidateError::InvalidRoot { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn file_root_is_invalid() {
        let td = tempdir().unwrap();
        let f = td.path().join("plain.txt");
        fs::write(&f, b"x").unwrap();
        let err = Config::new(&f, DuplicatePolicy::Skip).validate_root().unwrap_err();
        assert!(err.to_string().contains("is not a directory"));
    }

    #[test]
    fn directory_root_is_canonicalised() {
        let td = tempdir().unwrap();
        let sub = td.path().join("a");
        fs::create_dir_all(&sub).unwrap();
        let cfg = Config::new(sub.join("..").join("a"), DuplicatePolicy::Skip);
        let root = cfg.validate_root().unwrap();
        assert_eq!(root, dunce::canonicalize(&sub).unwrap());
    }
}
