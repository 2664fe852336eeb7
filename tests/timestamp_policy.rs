use assert_fs::prelude::*;
use consolidate::fs_ops::TIMESTAMP_FORMAT;
use consolidate::prelude::*;
use std::fs;

fn is_timestamped(name: &str, stem: &str, ext: &str) -> bool {
    let Some(rest) = name.strip_prefix(stem).and_then(|r| r.strip_suffix(ext)) else {
        return false;
    };
    let ts = rest.strip_prefix('_').unwrap_or("");
    let ts = ts.split('(').next().unwrap_or("");
    chrono::NaiveDateTime::parse_from_str(ts, TIMESTAMP_FORMAT).is_ok()
}

#[test]
fn colliding_files_get_distinct_timestamped_names() {
    let root = assert_fs::TempDir::new().unwrap();
    root.child("shot.png").write_str("root").unwrap();
    root.child("a/shot.png").write_str("a").unwrap();
    root.child("b/shot.png").write_str("b").unwrap();
    root.child("c/file").write_str("c").unwrap();
    root.child("file").write_str("root file").unwrap();

    let cfg = Config::new(root.path(), DuplicatePolicy::RenameWithTimestamp);
    let stats = consolidate(&cfg, None).unwrap();
    assert_eq!(stats.moved, 3);
    assert!(stats.success());

    let names: Vec<String> = fs::read_dir(root.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    let shots: Vec<&String> = names.iter().filter(|n| is_timestamped(n, "shot", ".png")).collect();
    assert_eq!(shots.len(), 2, "{names:?}");
    assert_ne!(shots[0], shots[1]);
    // No extension: no trailing dot.
    assert!(names.iter().any(|n| is_timestamped(n, "file", "")), "{names:?}");
    assert!(!names.iter().any(|n| n.ends_with('.')), "{names:?}");
    assert_eq!(fs::read_to_string(root.child("shot.png").path()).unwrap(), "root");
}
