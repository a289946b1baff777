//! Version-control capability used by the relocation orchestrator.
//!
//! `GitCli` shells out to `git` with bounded timeouts; `FakeVcs` is a scripted stand-in so
//! relocation behavior can be tested without depending on the host's tooling.

use std::path::Path;

use crate::errors::ContextCoderError;

pub mod fake;
pub mod git;
pub mod process;

pub use fake::{FakeCall, FakeVcs};
pub use git::GitCli;
pub use process::{run_bounded, ProcessLimits, ProcessOutcome};

/// Read-only probes plus the tool-native move.
///
/// Probes never fail: every failure mode collapses to `false`, which callers read as
/// "use the fallback strategy".
pub trait VersionControl {
    /// Is the tool installed and runnable?
    fn probe_available(&self) -> bool;

    /// Is `dir` inside a working tree controlled by the tool?
    fn probe_tracked(&self, dir: &Path) -> bool;

    /// Move `source` to `destination` (both relative to `dir`) with the tool.
    fn move_via_tool(
        &self,
        source: &str,
        destination: &str,
        dir: &Path,
    ) -> Result<(), ContextCoderError>;
}
