//! Integration tests for treesync-common-fs.

use std::fs;

use tempfile::tempdir;
use treesync_common_fs::{list_dir_names, path, read_to_string, write_string_atomic};

#[test]
fn descriptor_overwrite_is_complete() {
    let dir = tempdir().unwrap();
    let leaf = dir.path().join("01_a_proj");
    fs::create_dir(&leaf).unwrap();
    let target = leaf.join("CMakeLists.txt");

    fs::write(&target, "stale content that is much longer than the replacement\n").unwrap();
    write_string_atomic(&target, "set(TARGET a_proj)\n").unwrap();

    assert_eq!(read_to_string(&target, 4096).unwrap(), "set(TARGET a_proj)\n");
    // Only the descriptor is inside the leaf; no temp residue.
    let entries: Vec<_> = fs::read_dir(&leaf).unwrap().collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn listing_ignores_files_and_keeps_byte_order() {
    let dir = tempdir().unwrap();
    for name in ["B", "a", "10_x", "9_y", "02_z"] {
        fs::create_dir(dir.path().join(name)).unwrap();
    }
    fs::write(dir.path().join("notes.txt"), "").unwrap();

    let names = list_dir_names(dir.path()).unwrap();
    assert_eq!(names, vec!["02_z", "10_x", "9_y", "B", "a"]);
}

#[test]
fn join_name_builds_child_paths() {
    let dir = tempdir().unwrap();
    let child = path::join_name(dir.path(), "03_third").unwrap();
    assert_eq!(child.parent().unwrap(), dir.path());
}
