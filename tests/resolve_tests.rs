use context_coder::sandbox::{resolve, SandboxRoot};
use context_coder::ContextCoderError;
use std::path::Path;
use tempfile::tempdir;

#[test]
fn sandbox_root_is_canonical_and_absolute() {
    let td = tempdir().unwrap();
    let root = SandboxRoot::new(td.path()).unwrap();
    assert!(root.path().is_absolute());
    assert_eq!(root.path(), dunce::canonicalize(td.path()).unwrap());
}

#[test]
fn sandbox_root_must_be_an_existing_directory() {
    let td = tempdir().unwrap();
    assert!(SandboxRoot::new(td.path().join("missing")).is_err());
    let f = td.path().join("file.txt");
    std::fs::write(&f, b"x").unwrap();
    assert!(SandboxRoot::new(&f).is_err());
}

#[test]
fn resolved_paths_stay_under_root() {
    let td = tempdir().unwrap();
    let root = SandboxRoot::new(td.path()).unwrap();
    for (token, rel) in [
        ("", ""),
        (".", ""),
        ("./src/index.ts", "src/index.ts"),
        ("src/./utils.ts", "src/utils.ts"),
        ("a//b", "a/b"),
    ] {
        let got = root.resolve(token).unwrap();
        assert!(got.starts_with(root.path()), "{token:?} -> {}", got.display());
        let expected = rel
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(root.path().to_path_buf(), |p, s| p.join(s));
        assert_eq!(got, expected, "token {token:?}");
    }
}

#[test]
fn resolution_does_not_require_the_target_to_exist() {
    let td = tempdir().unwrap();
    let root = SandboxRoot::new(td.path()).unwrap();
    let got = root.resolve("not/yet/created.txt").unwrap();
    assert!(!got.exists());
}

/// The prefix check runs even when validation was skipped.
#[test]
fn unvalidated_escape_is_an_internal_consistency_failure() {
    let err = resolve(Path::new("/sandbox"), "../sandbox-evil/x").unwrap_err();
    assert!(matches!(err, ContextCoderError::InternalConsistency { .. }));
    assert!(err.is_fatal());
}
