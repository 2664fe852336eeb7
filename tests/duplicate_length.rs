use std::ffi::{OsStr, OsString};

use consolidate::fs_ops::{counter_name, timestamp_counter_name, timestamp_name};

fn long_name(base: &str, total_len: usize) -> OsString {
    let mut s = base.repeat(total_len);
    s.truncate(total_len.saturating_sub(4)); // leave room for .txt
    s.push_str(".txt");
    OsString::from(s)
}

#[test]
fn suffixed_names_stay_within_filename_limit() {
    let name = long_name("b", 255);
    for out in [
        counter_name(&name, 999_999),
        timestamp_name(&name, "20240101_120000"),
        timestamp_counter_name(&name, "20240101_120000", 42),
    ] {
        let s = out.to_string_lossy();
        assert!(s.len() <= 255, "too long: {}", s.len());
        assert!(s.ends_with(".txt"), "{s}");
    }
}

#[test]
fn short_names_are_untouched() {
    assert_eq!(counter_name(OsStr::new("a.txt"), 3), OsString::from("a(3).txt"));
    assert_eq!(
        timestamp_counter_name(OsStr::new("a"), "20240101_120000", 1),
        OsString::from("a_20240101_120000(1)")
    );
}
