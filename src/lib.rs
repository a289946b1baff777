//! Core library for `context_coder`.
//!
//! Contains the sandbox (path validation and resolution), the git probe, the relocation
//! orchestrator and control-file discovery. Everything is driven by an explicit
//! [`OperationContext`]; there is no process-wide mode state besides the shutdown flag.

pub mod cli;
pub mod config;
pub mod context;
pub mod control_files;
pub mod digest;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod sandbox;
pub mod shutdown;
pub mod vcs;

pub use config::{
    default_config_path, default_log_path, path_has_symlink_ancestor, Config, FallbackPolicy,
    LogLevel,
};
pub use context::OperationContext;
pub use control_files::{find_control_file, ControlFiles, IGNORE_FILE, MINIFY_FILE};
pub use errors::ContextCoderError;
pub use fs_ops::{relocate, RelocationOutcome, RelocationRequest, Strategy};
pub use sandbox::{format_display, validate, ParentPolicy, SandboxRoot};
pub use vcs::{GitCli, VersionControl};
