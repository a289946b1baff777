//! Windows implementations of platform helpers (best-effort).
//!
//! Notes:
//! - Windows lacks POSIX mode semantics; we do not attempt ACL management here.
//! - There is no SIGTERM; termination requests go straight to TerminateProcess.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::process::Child;

/// Open log file for appending (best-effort; no symlink defense available via std on Windows).
pub fn open_log_file_secure_append(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// No graceful signal exists; terminate immediately.
pub fn request_terminate(child: &mut Child) -> io::Result<()> {
    child.kill()
}
