//! Relocation orchestrator.
//! Validates both endpoints, prepares the destination directory, then moves with
//! `git mv` when the root is a tracked working tree and with a plain rename otherwise.
//!
//! Notes:
//! - No filesystem mutation happens until both tokens have validated and resolved.
//! - Only the last strategy attempted can surface an error to the caller.
//! - Directory creation is not rolled back when the move itself fails.

use std::fmt;
use std::path::Path;
use tracing::{debug, info};

use crate::config::FallbackPolicy;
use crate::context::OperationContext;
use crate::errors::ContextCoderError;
use crate::sandbox::format_display;
use crate::shutdown;

use super::atomic::{ensure_parent_dir, try_atomic_move};

/// A move between two caller-supplied tokens, both relative to the sandbox root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationRequest {
    pub source: String,
    pub destination: String,
}

impl RelocationRequest {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Which strategy actually moved the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    VersionControlMoved,
    PrimitiveRenamed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelocationOutcome {
    pub strategy: Strategy,
    pub display_source: String,
    pub display_destination: String,
}

impl RelocationOutcome {
    /// Caller-facing confirmation; identical whichever strategy ran.
    pub fn message(&self) -> String {
        format!(
            "Successfully moved {} to {}",
            self.display_source, self.display_destination
        )
    }
}

impl fmt::Display for RelocationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Result of probing the tool for the sandbox root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ToolState {
    Absent,
    Untracked,
    Tracked,
}

fn probe_tool(ctx: &OperationContext) -> ToolState {
    if !ctx.vcs().probe_available() {
        ToolState::Absent
    } else if !ctx.vcs().probe_tracked(ctx.root().path()) {
        ToolState::Untracked
    } else {
        ToolState::Tracked
    }
}

/// Move `request.source` to `request.destination` inside the context's sandbox root.
pub fn relocate(
    ctx: &OperationContext,
    request: &RelocationRequest,
) -> Result<RelocationOutcome, ContextCoderError> {
    let source = request.source.as_str();
    let destination = request.destination.as_str();
    debug!(source, destination, "relocate started");

    ctx.validate(source)?;
    ctx.validate(destination)?;
    let abs_source = ctx.root().resolve(source)?;
    let abs_dest = ctx.root().resolve(destination)?;

    // Last point at which an interrupt is honored; past here the move runs to completion.
    if shutdown::is_requested() {
        return Err(ContextCoderError::Interrupted);
    }

    ensure_parent_dir(&abs_dest)?;

    let strategy = match probe_tool(ctx) {
        ToolState::Tracked => {
            match ctx
                .vcs()
                .move_via_tool(source, destination, ctx.root().path())
            {
                Ok(()) => {
                    info!(source, destination, "Used git mv");
                    Strategy::VersionControlMoved
                }
                Err(e) => match ctx.fallback() {
                    FallbackPolicy::AnyFailure => {
                        debug!(error = %e, "git mv failed, falling back to rename");
                        rename(&abs_source, &abs_dest)?
                    }
                    FallbackPolicy::ToolUnavailableOnly => {
                        debug!(error = %e, "git mv failed; fallback disabled by policy");
                        return Err(e);
                    }
                },
            }
        }
        ToolState::Untracked => {
            debug!("Using rename: root is not a git working tree");
            rename(&abs_source, &abs_dest)?
        }
        ToolState::Absent => {
            debug!("Using rename: git not available");
            rename(&abs_source, &abs_dest)?
        }
    };

    let outcome = RelocationOutcome {
        strategy,
        display_source: format_display(source),
        display_destination: format_display(destination),
    };
    debug!(?strategy, source, destination, "relocate finished");
    Ok(outcome)
}

fn rename(abs_source: &Path, abs_dest: &Path) -> Result<Strategy, ContextCoderError> {
    try_atomic_move(abs_source, abs_dest)?;
    info!(
        src = %abs_source.display(),
        dest = %abs_dest.display(),
        "Used rename"
    );
    Ok(Strategy::PrimitiveRenamed)
}
