use std::fs::File;
use std::io;
use std::path::Path;

/// Flush directory entries so a completed rename survives a crash.
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}
