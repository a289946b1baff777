//! Bounded external process execution.
//!
//! The calling thread owns the `Child` and polls `try_wait` against a deadline. Stdout and
//! stderr are drained by short-lived reader threads so a chatty child never blocks on a full
//! pipe. On timeout the child gets SIGTERM, then SIGKILL once the grace window lapses.

use std::ffi::OsStr;
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::platform::request_terminate;

pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_KILL_GRACE: Duration = Duration::from_secs(5);

const POLL_INTERVAL: Duration = Duration::from_millis(10);
const READER_JOIN_TIMEOUT: Duration = Duration::from_secs(1);
/// Clamp for limits too large to add to `Instant::now()`.
const LONGEST_WAIT: Duration = Duration::from_secs(24 * 60 * 60);

/// Time limits for one external invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessLimits {
    /// How long the child may run before it is asked to terminate.
    pub timeout: Duration,
    /// How long to wait after SIGTERM before SIGKILL.
    pub kill_grace: Duration,
}

impl Default for ProcessLimits {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TOOL_TIMEOUT,
            kill_grace: DEFAULT_KILL_GRACE,
        }
    }
}

#[derive(Debug)]
pub enum ProcessOutcome {
    Exited {
        status: ExitStatus,
        stdout: String,
        stderr: String,
    },
    TimedOut,
    /// Spawn or wait failed (e.g. program not found).
    Failed(io::Error),
}

impl ProcessOutcome {
    /// Zero exit is the only success signal.
    pub fn success(&self) -> bool {
        matches!(self, ProcessOutcome::Exited { status, .. } if status.success())
    }
}

/// Run `program` with an explicit argument vector (never through a shell).
pub fn run_bounded<I, S>(
    program: &OsStr,
    args: I,
    cwd: Option<&Path>,
    limits: ProcessLimits,
) -> ProcessOutcome
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            debug!(program = %program.to_string_lossy(), error = %e, "spawn failed");
            return ProcessOutcome::Failed(e);
        }
    };

    let stdout_reader = child.stdout.take().map(drain);
    let stderr_reader = child.stderr.take().map(drain);

    let deadline = deadline_after(limits.timeout);
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {}
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return ProcessOutcome::Failed(e);
            }
        }
        if Instant::now() >= deadline {
            warn!(
                program = %program.to_string_lossy(),
                timeout_ms = limits.timeout.as_millis() as u64,
                "external command timed out; terminating"
            );
            terminate(&mut child, limits.kill_grace);
            drop(child);
            let join_deadline = Instant::now() + READER_JOIN_TIMEOUT;
            join_bounded(stdout_reader, join_deadline);
            join_bounded(stderr_reader, join_deadline);
            return ProcessOutcome::TimedOut;
        }
        thread::sleep(POLL_INTERVAL);
    };

    let join_deadline = Instant::now() + READER_JOIN_TIMEOUT;
    let stdout = join_bounded(stdout_reader, join_deadline);
    let stderr = join_bounded(stderr_reader, join_deadline);
    ProcessOutcome::Exited {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
    }
}

/// `now + wait`, clamped instead of panicking on overflow.
fn deadline_after(wait: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(wait)
        .or_else(|| now.checked_add(LONGEST_WAIT))
        .unwrap_or(now)
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

/// Join a reader, abandoning it if a grandchild still holds the pipe open past `deadline`.
fn join_bounded(handle: Option<JoinHandle<Vec<u8>>>, deadline: Instant) -> Vec<u8> {
    let Some(handle) = handle else {
        return Vec::new();
    };
    while !handle.is_finished() {
        if Instant::now() >= deadline {
            return Vec::new();
        }
        thread::sleep(POLL_INTERVAL);
    }
    handle.join().unwrap_or_default()
}

/// SIGTERM, wait up to `grace`, then SIGKILL and reap.
fn terminate(child: &mut Child, grace: Duration) {
    if let Err(e) = request_terminate(child) {
        debug!(error = %e, "terminate request failed");
    }
    let grace_deadline = deadline_after(grace);
    while Instant::now() < grace_deadline {
        if let Ok(Some(_)) = child.try_wait() {
            return;
        }
        thread::sleep(POLL_INTERVAL);
    }
    warn!(pid = child.id(), "child survived termination request; killing");
    let _ = child.kill();
    let _ = child.wait();
}
