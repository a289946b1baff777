//! Scripted in-memory stand-in for a version-control tool.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::errors::ContextCoderError;

use super::VersionControl;

/// One recorded interaction, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    ProbeAvailable,
    ProbeTracked(PathBuf),
    Move {
        source: String,
        destination: String,
        dir: PathBuf,
    },
}

#[derive(Debug)]
pub struct FakeVcs {
    available: bool,
    tracked: bool,
    move_failure: Option<String>,
    calls: Mutex<Vec<FakeCall>>,
}

impl FakeVcs {
    fn with(available: bool, tracked: bool) -> Self {
        Self {
            available,
            tracked,
            move_failure: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Tool not installed.
    pub fn absent() -> Self {
        Self::with(false, false)
    }

    /// Tool installed, but the directory is not a working tree.
    pub fn untracked() -> Self {
        Self::with(true, false)
    }

    /// Tool installed and the directory is tracked; moves rename on disk like `git mv`.
    pub fn tracked() -> Self {
        Self::with(true, true)
    }

    /// Make every tool move fail with `reason` without touching the filesystem.
    pub fn failing_moves(mut self, reason: impl Into<String>) -> Self {
        self.move_failure = Some(reason.into());
        self
    }

    pub fn calls(&self) -> Vec<FakeCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn move_attempts(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, FakeCall::Move { .. }))
            .count()
    }

    fn record(&self, call: FakeCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl VersionControl for FakeVcs {
    fn probe_available(&self) -> bool {
        self.record(FakeCall::ProbeAvailable);
        self.available
    }

    fn probe_tracked(&self, dir: &Path) -> bool {
        self.record(FakeCall::ProbeTracked(dir.to_path_buf()));
        self.available && self.tracked
    }

    fn move_via_tool(
        &self,
        source: &str,
        destination: &str,
        dir: &Path,
    ) -> Result<(), ContextCoderError> {
        self.record(FakeCall::Move {
            source: source.to_string(),
            destination: destination.to_string(),
            dir: dir.to_path_buf(),
        });
        if let Some(reason) = &self.move_failure {
            return Err(ContextCoderError::ToolFailure {
                reason: reason.clone(),
            });
        }
        fs::rename(dir.join(source), dir.join(destination)).map_err(|e| {
            ContextCoderError::ToolFailure {
                reason: format!("fatal: bad source, source={source}, destination={destination}: {e}"),
            }
        })
    }
}
