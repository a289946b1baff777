//! Per-directory control files.
//!
//! A directory may carry `.cocoignore` (extra exclusions) and `.cocominify` (files to include
//! as placeholders) for the digest engine. Discovery is a plain existence check, repeated on
//! every call so edits on disk take effect immediately.

use std::path::Path;

pub const IGNORE_FILE: &str = ".cocoignore";
pub const MINIFY_FILE: &str = ".cocominify";

const IGNORE_TIP: &str = "Tip: add a .cocoignore file to exclude specific files and directories from the codebase analysis.";
const MINIFY_TIP: &str = "Tip: add a .cocominify file to include files with placeholder content instead of excluding them entirely.";

/// Return `name` if a regular file with that name sits directly inside `dir`.
pub fn find_control_file(dir: &Path, name: &str) -> Option<String> {
    dir.join(name).is_file().then(|| name.to_string())
}

pub fn ignore_file(dir: &Path) -> Option<String> {
    find_control_file(dir, IGNORE_FILE)
}

pub fn minify_file(dir: &Path) -> Option<String> {
    find_control_file(dir, MINIFY_FILE)
}

/// Snapshot of both control files for one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlFiles {
    pub ignore: Option<String>,
    pub minify: Option<String>,
}

impl ControlFiles {
    pub fn probe(dir: &Path) -> Self {
        Self {
            ignore: ignore_file(dir),
            minify: minify_file(dir),
        }
    }

    /// One hint per missing control file.
    pub fn startup_tips(&self) -> Vec<&'static str> {
        let mut tips = Vec::new();
        if self.ignore.is_none() {
            tips.push(IGNORE_TIP);
        }
        if self.minify.is_none() {
            tips.push(MINIFY_TIP);
        }
        tips
    }
}
