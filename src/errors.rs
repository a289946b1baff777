//! Typed error definitions for context_coder.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContextCoderError {
    /// A token would climb out of the sandbox root. Rejected before any mutation.
    #[error("Path cannot contain parent directory references: '{token}'")]
    PathEscape { token: String },

    #[error("Path must be relative to the sandbox root: '{token}'")]
    AbsolutePath { token: String },

    /// The resolver produced a path outside the root even though validation passed.
    /// This is a validator defect, never a caller mistake.
    #[error(
        "internal consistency check failed: '{}' escaped sandbox root '{}' after validation",
        .resolved.display(),
        .root.display()
    )]
    InternalConsistency { root: PathBuf, resolved: PathBuf },

    #[error("git mv failed: {reason}")]
    ToolFailure { reason: String },

    #[error("{op} '{}' failed: {:?}: {source}{hint}", .path.display(), .source.kind())]
    Filesystem {
        op: &'static str,
        path: PathBuf,
        hint: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Operation interrupted by user")]
    Interrupted,
}

impl ContextCoderError {
    /// Stable numeric code used in structured logs.
    pub fn code(&self) -> i32 {
        match self {
            ContextCoderError::PathEscape { .. } => 10,
            ContextCoderError::AbsolutePath { .. } => 11,
            ContextCoderError::ToolFailure { .. } => 20,
            ContextCoderError::Filesystem { .. } => 30,
            ContextCoderError::InternalConsistency { .. } => 70,
            ContextCoderError::Interrupted => 130,
        }
    }

    /// Short machine-friendly label for the `kind` log field.
    pub fn kind(&self) -> &'static str {
        match self {
            ContextCoderError::PathEscape { .. } => "path_escape",
            ContextCoderError::AbsolutePath { .. } => "absolute_path",
            ContextCoderError::ToolFailure { .. } => "tool_failure",
            ContextCoderError::Filesystem { .. } => "filesystem",
            ContextCoderError::InternalConsistency { .. } => "internal_consistency",
            ContextCoderError::Interrupted => "interrupted",
        }
    }

    /// The underlying io::ErrorKind for filesystem failures.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            ContextCoderError::Filesystem { source, .. } => Some(source.kind()),
            _ => None,
        }
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ContextCoderError::InternalConsistency { .. })
    }
}
