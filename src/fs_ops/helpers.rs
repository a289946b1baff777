//! I/O helper utilities.
//!
//! Converts io::Error into `ContextCoderError::Filesystem`, keeping the original error (and
//! its kind) as the source and adding a platform-aware hint.
//!
//! Usage:
//!   fs::create_dir_all(dir).map_err(io_error_with_help("create directory", dir))?;

use std::io;
use std::path::Path;

use crate::errors::ContextCoderError;

/// Actionable hint for common failures, chosen by raw OS code first, then by kind.
pub fn hint_for(e: &io::Error) -> &'static str {
    if let Some(code) = e.raw_os_error() {
        #[cfg(unix)]
        {
            let hint = match code {
                libc::EACCES | libc::EPERM => "; permission denied, check ownership and write permissions",
                libc::EXDEV => "; cross-filesystem, atomic rename not possible",
                libc::EBUSY => "; resource busy, ensure no other process is using it",
                libc::ENOENT => "; path not found, verify it exists",
                libc::EEXIST => "; already exists, pick a unique name or remove the target",
                libc::ENOTEMPTY => "; destination directory is not empty",
                libc::EISDIR => "; destination is a directory",
                libc::ENOTDIR => "; a path component is not a directory",
                libc::ENOSPC => "; insufficient space on device",
                libc::EROFS => "; read-only filesystem, cannot write here",
                libc::ENAMETOOLONG => "; filename or path too long, shorten path segments",
                _ => "",
            };
            if !hint.is_empty() {
                return hint;
            }
        }
        #[cfg(windows)]
        {
            let hint = match code {
                5 => "; access denied, check permissions",
                17 => "; not same device, cross-filesystem move",
                32 => "; sharing violation, file is in use",
                2 | 3 => "; path not found, verify it exists",
                80 | 183 => "; already exists, pick a unique name",
                112 => "; insufficient disk space",
                206 => "; filename or path too long",
                _ => "",
            };
            if !hint.is_empty() {
                return hint;
            }
        }
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => "; permission denied, check ownership and write permissions",
        io::ErrorKind::NotFound => "; path not found, verify it exists",
        io::ErrorKind::AlreadyExists => "; already exists, remove or choose a unique name",
        _ => "",
    }
}

/// Returns a closure suitable for `.map_err(...)` that wraps the io::Error with `op` and `path`.
pub fn io_error_with_help<'a>(
    op: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> ContextCoderError + 'a {
    move |e: io::Error| ContextCoderError::Filesystem {
        op,
        path: path.to_path_buf(),
        hint: hint_for(&e),
        source: e,
    }
}
