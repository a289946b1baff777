//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - Path tokens for `mv` and `check` are passed through untouched; the sandbox validates them.
//! - --debug is a shorthand for --log-level debug.

use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, FallbackPolicy, LogLevel};

/// Sandboxed, git-aware file relocation for full-context coding tools.
/// CLI flags override config values (which are loaded from XML if present).
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Move files inside a sandbox root, preferring git mv when the root is a git work tree"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Override the sandbox root (normally configured via XML, defaults to the current directory).
    #[arg(long, global = true, value_hint = ValueHint::DirPath, help = "Override the sandbox root directory")]
    pub root: Option<PathBuf>,

    /// Read configuration from this XML file instead of the default location.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help = "Use this config file")]
    pub config: Option<PathBuf>,

    /// Append logs to this file in addition to stdout.
    #[arg(long, global = true, value_hint = ValueHint::FilePath, help = "Also write logs to this file")]
    pub log_file: Option<PathBuf>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        global = true,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, global = true, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// When a failing `git mv` may be replaced by a plain rename.
    #[arg(
        long,
        global = true,
        value_name = "POLICY",
        help = "Fallback after git mv fails: any-failure (default) or unavailable-only"
    )]
    pub fallback: Option<FallbackPolicy>,

    /// Print where context-coder will look for the config file, then exit.
    #[arg(long, help = "Print the config file location used by context-coder and exit")]
    pub print_config: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and structured fields).
    #[arg(long, global = true, help = "Emit logs in structured JSON")]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move SOURCE to DESTINATION, both relative to the sandbox root.
    #[command(name = "mv")]
    Move {
        #[arg(value_name = "SOURCE")]
        source: String,
        #[arg(value_name = "DESTINATION")]
        destination: String,
    },
    /// Report control files, tips and git status for DIR (default: the root).
    Check {
        #[arg(value_name = "DIR", default_value = "")]
        path: String,
    },
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// The subcommand to run; a bare invocation checks the root.
    pub fn command_or_default(&self) -> Command {
        self.command.clone().unwrap_or(Command::Check {
            path: String::new(),
        })
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(root) = &self.root {
            cfg.root = root.clone();
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
        if let Some(policy) = self.fallback {
            cfg.fallback = policy;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
