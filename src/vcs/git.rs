//! `git` command-line backend.

use std::ffi::{OsStr, OsString};
use std::path::Path;
use tracing::debug;

use crate::errors::ContextCoderError;

use super::VersionControl;
use super::process::{run_bounded, ProcessLimits, ProcessOutcome};

#[derive(Debug, Clone)]
pub struct GitCli {
    program: OsString,
    limits: ProcessLimits,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new(ProcessLimits::default())
    }
}

impl GitCli {
    /// Use `git` from PATH.
    pub fn new(limits: ProcessLimits) -> Self {
        Self::with_program("git", limits)
    }

    /// Use a specific executable (tests, or hosts with git outside PATH).
    pub fn with_program(program: impl AsRef<OsStr>, limits: ProcessLimits) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            limits,
        }
    }

    fn run(&self, args: &[&str], cwd: Option<&Path>) -> ProcessOutcome {
        run_bounded(&self.program, args, cwd, self.limits)
    }
}

impl VersionControl for GitCli {
    fn probe_available(&self) -> bool {
        let available = self.run(&["--version"], None).success();
        debug!(available, "git availability probe");
        available
    }

    fn probe_tracked(&self, dir: &Path) -> bool {
        let tracked = self
            .run(&["rev-parse", "--is-inside-work-tree"], Some(dir))
            .success();
        debug!(dir = %dir.display(), tracked, "git work-tree probe");
        tracked
    }

    fn move_via_tool(
        &self,
        source: &str,
        destination: &str,
        dir: &Path,
    ) -> Result<(), ContextCoderError> {
        // `--` keeps tokens that start with '-' from being read as options.
        match self.run(&["mv", "--", source, destination], Some(dir)) {
            ProcessOutcome::Exited { status, .. } if status.success() => {
                debug!(source, destination, "git mv successful");
                Ok(())
            }
            ProcessOutcome::Exited {
                status,
                stdout,
                stderr,
            } => {
                let reason = [stderr.trim(), stdout.trim()]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| match status.code() {
                        Some(code) => format!("exit code {code}"),
                        None => "terminated by signal".to_string(),
                    });
                Err(ContextCoderError::ToolFailure { reason })
            }
            ProcessOutcome::TimedOut => Err(ContextCoderError::ToolFailure {
                reason: format!("timed out after {}ms", self.limits.timeout.as_millis()),
            }),
            ProcessOutcome::Failed(e) => Err(ContextCoderError::ToolFailure {
                reason: format!("could not run git: {e}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn missing() -> GitCli {
        GitCli::with_program(
            "context-coder-missing-git",
            ProcessLimits {
                timeout: Duration::from_millis(500),
                kill_grace: Duration::from_millis(100),
            },
        )
    }

    #[test]
    fn missing_binary_probes_false() {
        let git = missing();
        assert!(!git.probe_available());
        assert!(!git.probe_tracked(Path::new(".")));
    }

    #[test]
    fn missing_binary_move_is_tool_failure() {
        let err = missing()
            .move_via_tool("a", "b", Path::new("."))
            .unwrap_err();
        assert!(matches!(err, ContextCoderError::ToolFailure { .. }));
        assert!(err.to_string().contains("could not run git"));
    }
}
