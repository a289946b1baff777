//! Core configuration types.
//! - Config holds runtime settings with sensible defaults.
//! - LogLevel and FallbackPolicy represent user-facing choices with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::sandbox::ParentPolicy;
use crate::vcs::process::{DEFAULT_KILL_GRACE, DEFAULT_TOOL_TIMEOUT, ProcessLimits};

use super::{PAGE_SIZE_DEFAULT, ROOT_DEFAULT};

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// When a failed `git mv` may be replaced by a plain rename.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Any git failure (exit code, timeout, spawn error) falls back to rename.
    #[default]
    AnyFailure,
    /// Fall back only when git is absent or the root is untracked; a failing
    /// `git mv` is reported to the caller.
    ToolUnavailableOnly,
}

impl FallbackPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any-failure" | "any" | "always" => Some(FallbackPolicy::AnyFailure),
            "unavailable-only" | "unavailable" | "strict" => {
                Some(FallbackPolicy::ToolUnavailableOnly)
            }
            _ => None,
        }
    }
}

impl fmt::Display for FallbackPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FallbackPolicy::AnyFailure => "any-failure",
            FallbackPolicy::ToolUnavailableOnly => "unavailable-only",
        })
    }
}

impl FromStr for FallbackPolicy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid fallback policy: '{s}'"))
    }
}

/// Runtime configuration, threaded explicitly into every operation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Sandbox root; every path token is resolved against it
    pub root: PathBuf,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Hard limit for each git invocation
    pub tool_timeout: Duration,
    /// Wait between SIGTERM and SIGKILL for a timed-out git
    pub kill_grace: Duration,
    pub fallback: FallbackPolicy,
    pub parent_policy: ParentPolicy,
    /// Characters per digest page
    pub page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::from(ROOT_DEFAULT),
            log_level: LogLevel::Normal,
            log_file: None,
            tool_timeout: DEFAULT_TOOL_TIMEOUT,
            kill_grace: DEFAULT_KILL_GRACE,
            fallback: FallbackPolicy::default(),
            parent_policy: ParentPolicy::default(),
            page_size: PAGE_SIZE_DEFAULT,
        }
    }
}

impl Config {
    /// Construct a Config rooted at `root`; other fields use defaults.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    pub fn process_limits(&self) -> ProcessLimits {
        ProcessLimits {
            timeout: self.tool_timeout,
            kill_grace: self.kill_grace,
        }
    }
}
