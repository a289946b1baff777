//! Resolving validated tokens against the sandbox root.
//! The containment check here is the enforcement point of the boundary; it runs even
//! though `validate` already accepted the token.

use anyhow::{bail, Context, Result};
use std::path::{Component, Path, PathBuf};
use tracing::error;

use crate::errors::ContextCoderError;

use super::validate::is_separator;

/// Absolute, canonical directory that every relative token is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SandboxRoot(PathBuf);

impl SandboxRoot {
    /// Canonicalize `path` and require it to be an existing directory.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let canonical = dunce::canonicalize(path)
            .with_context(|| format!("resolve sandbox root '{}'", path.display()))?;
        if !canonical.is_dir() {
            bail!("sandbox root is not a directory: {}", canonical.display());
        }
        Ok(Self(canonical))
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    pub fn resolve(&self, token: &str) -> Result<PathBuf, ContextCoderError> {
        resolve(&self.0, token)
    }
}

impl AsRef<Path> for SandboxRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

/// Join `token` onto `root`, normalize lexically and verify `root` is a component-wise
/// prefix of the result.
pub fn resolve(root: &Path, token: &str) -> Result<PathBuf, ContextCoderError> {
    let mut joined = root.to_path_buf();
    for segment in token.split(is_separator).filter(|s| !s.is_empty()) {
        joined.push(segment);
    }
    let resolved = normalize_lexically(&joined);

    if !resolved.starts_with(root) {
        error!(
            root = %root.display(),
            token,
            resolved = %resolved.display(),
            "resolved path escaped sandbox root after validation"
        );
        return Err(ContextCoderError::InternalConsistency {
            root: root.to_path_buf(),
            resolved,
        });
    }
    Ok(resolved)
}

/// Collapse `.` and `..` without touching the filesystem.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
