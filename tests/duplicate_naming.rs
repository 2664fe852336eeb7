use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

use consolidate::fs_ops::{counter_name, split_name, Resolution, Resolver};
use consolidate::DuplicatePolicy;

/// root/<name> exists and root/in/<name> is the incoming file.
fn resolve_counter(root: &Path, name: &str) -> Resolution {
    fs::create_dir_all(root.join("in")).unwrap();
    let src = root.join("in").join(name);
    fs::write(&src, b"incoming").unwrap();
    Resolver::new(root, 100)
        .resolve(&src, DuplicatePolicy::RenameWithCounter, None)
        .unwrap()
}

#[test]
fn no_collision_returns_requested_name() {
    let td = tempdir().unwrap();
    let root = td.path();
    assert_eq!(resolve_counter(root, "file.txt"), Resolution::ProceedAs(root.join("file.txt")));
}

#[test]
fn single_collision_gets_counter_one() {
    let td = tempdir().unwrap();
    let root = td.path();
    fs::write(root.join("file.txt"), b"x").unwrap();
    assert_eq!(resolve_counter(root, "file.txt"), Resolution::ProceedAs(root.join("file(1).txt")));
}

#[test]
fn multiple_collisions_increment_counter() {
    let td = tempdir().unwrap();
    let root = td.path();
    for n in ["file.txt", "file(1).txt", "file(2).txt", "file(3).txt"] {
        fs::write(root.join(n), b"x").unwrap();
    }
    assert_eq!(resolve_counter(root, "file.txt"), Resolution::ProceedAs(root.join("file(4).txt")));
}

#[test]
fn dotfile_and_multi_extension_positions() {
    let td = tempdir().unwrap();
    let root = td.path();
    fs::write(root.join(".env"), b"a").unwrap();
    assert_eq!(resolve_counter(root, ".env"), Resolution::ProceedAs(root.join(".env(1)")));

    fs::write(root.join("archive.tar.gz"), b"a").unwrap();
    assert_eq!(
        resolve_counter(root, "archive.tar.gz"),
        Resolution::ProceedAs(root.join("archive.tar(1).gz"))
    );
}

#[test]
fn split_name_edge_cases() {
    assert_eq!(split_name(OsStr::new("README")), ("README".into(), None));
    assert_eq!(split_name(OsStr::new("a.b.c")), ("a.b".into(), Some("c".into())));
    assert_eq!(split_name(OsStr::new(".bashrc")), (".bashrc".into(), None));
}

#[cfg(unix)]
#[test]
fn non_utf8_name_keeps_its_bytes() {
    use std::os::unix::ffi::OsStrExt;
    let raw = [0xff, 0xfe, b'.', b't', b'x', b't'];
    let out = counter_name(OsStr::from_bytes(&raw), 2);
    assert_eq!(out.as_bytes(), b"\xff\xfe(2).txt");
}
