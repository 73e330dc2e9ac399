// astrars/src/runner.rs

//! Blocking subprocess invocation with an enforced wall-clock timeout.
//!
//! The external binary is assumed non-idempotent on its own working
//! directory, so a failed run is surfaced as-is and never retried.

use log::{debug, info};
use std::ffi::OsStr;
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

/// How often the child is polled for completion.
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Errors raised while driving the external binary.
#[derive(Error, Debug)]
pub enum RunError {
    /// The run exceeded its wall-clock limit and was killed.
    #[error("simulation exceeded the {}s wall-clock limit", .timeout.as_secs())]
    SimulationTimeout { timeout: Duration },

    /// The binary exited with a non-zero status.
    #[error("external process `{binary}` failed ({status}): {stderr}")]
    ExternalProcessFailure {
        binary: String,
        status: String,
        stderr: String,
    },

    /// I/O fault while spawning or reaping the process.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Captured output of a finished run.
#[derive(Debug)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run `binary` with `args`, blocking until it exits or the timeout
/// elapses.
///
/// Output is drained concurrently so a chatty child cannot stall on a full
/// pipe while being polled. On timeout the child is killed and reaped
/// before the error is returned.
pub fn run_with_timeout(
    binary: &Path,
    args: &[&OsStr],
    cwd: Option<&Path>,
    timeout: Duration,
) -> Result<ProcessOutput, RunError> {
    let mut command = Command::new(binary);
    command
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = cwd {
        command.current_dir(cwd);
    }

    info!(
        "invoking {} (timeout {}s)",
        binary.display(),
        timeout.as_secs()
    );
    let mut child = command.spawn()?;
    let stdout_reader = child.stdout.take().map(spawn_reader);
    let stderr_reader = child.stderr.take().map(spawn_reader);

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            debug!("deadline exceeded, killing {}", binary.display());
            let _ = child.kill();
            let _ = child.wait();
            return Err(RunError::SimulationTimeout { timeout });
        }
        thread::sleep(POLL_INTERVAL);
    };

    let stdout = join_reader(stdout_reader);
    let stderr = join_reader(stderr_reader);

    if !status.success() {
        return Err(RunError::ExternalProcessFailure {
            binary: binary.display().to_string(),
            status: status.to_string(),
            stderr: stderr.trim_end().to_string(),
        });
    }

    Ok(ProcessOutput { stdout, stderr })
}

fn spawn_reader<R: Read + Send + 'static>(mut stream: R) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stream.read_to_end(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_reader(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
