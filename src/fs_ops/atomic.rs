//! Primitive rename helpers.
//! - Ensures the destination's parent exists (idempotent).
//! - Performs a rename with context-rich errors.
//! - On Unix, best-effort fsync of the destination directory after rename.

use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::ContextCoderError;

use super::helpers::io_error_with_help;

/// Create every missing ancestor of `path`. Succeeds silently when they already exist.
pub fn ensure_parent_dir(path: &Path) -> Result<(), ContextCoderError> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    fs::create_dir_all(parent).map_err(io_error_with_help("create directory", parent))?;
    debug!(dir = %parent.display(), "destination parent ready");
    Ok(())
}

/// Rename `src` to `dst`. Fails with NotFound when `src` is missing; never retried.
pub fn try_atomic_move(src: &Path, dst: &Path) -> Result<(), ContextCoderError> {
    fs::rename(src, dst).map_err(io_error_with_help("rename", src))?;

    // Ignore fsync errors to avoid turning a successful rename into a failure.
    #[cfg(unix)]
    if let Some(parent) = dst.parent() {
        let _ = super::util::fsync_dir(parent);
    }

    Ok(())
}
