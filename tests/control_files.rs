use assert_fs::prelude::*;
use context_coder::control_files::{find_control_file, ignore_file, minify_file};
use context_coder::{ControlFiles, IGNORE_FILE, MINIFY_FILE};

#[test]
fn absent_files_yield_none_and_two_tips() {
    let dir = assert_fs::TempDir::new().unwrap();
    let found = ControlFiles::probe(dir.path());
    assert_eq!(found, ControlFiles::default());
    let tips = found.startup_tips();
    assert_eq!(tips.len(), 2);
    assert!(tips[0].contains(IGNORE_FILE));
    assert!(tips[1].contains(MINIFY_FILE));
}

#[test]
fn both_files_present() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(IGNORE_FILE).write_str("node_modules\n*.log\n").unwrap();
    dir.child(MINIFY_FILE).write_str("*.min.js\n").unwrap();

    assert_eq!(ignore_file(dir.path()).as_deref(), Some(".cocoignore"));
    assert_eq!(minify_file(dir.path()).as_deref(), Some(".cocominify"));
    assert!(ControlFiles::probe(dir.path()).startup_tips().is_empty());
}

#[test]
fn only_direct_children_count() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child("nested").child(IGNORE_FILE).write_str("x").unwrap();
    assert_eq!(ignore_file(dir.path()), None);
    assert_eq!(
        ignore_file(&dir.path().join("nested")).as_deref(),
        Some(IGNORE_FILE)
    );
}

#[test]
fn arbitrary_names_can_be_probed() {
    let dir = assert_fs::TempDir::new().unwrap();
    dir.child(".custom").touch().unwrap();
    assert_eq!(find_control_file(dir.path(), ".custom").as_deref(), Some(".custom"));
    assert_eq!(find_control_file(dir.path(), ".other"), None);
}
