//! External program execution with a time budget.
//!
//! Every probe nwdiag makes (`rabbitmqctl status`, the Python interpreter,
//! `command` actions of remote modules) goes through [`run_program`], which
//! captures output on reader threads and kills the child when the timeout
//! expires.

use crate::error::{DiagError, Result};
use std::io::{self, Read};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

/// Result of executing a program.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Run `program` with `args`, capturing output.
///
/// Returns the spawn error unchanged so callers can tell
/// [`io::ErrorKind::NotFound`] apart from other failures. A program that
/// outlives `timeout` is killed and reported as [`io::ErrorKind::TimedOut`].
pub fn run_program(
    program: impl AsRef<Path>,
    args: &[&str],
    cwd: Option<&Path>,
    timeout: Duration,
) -> io::Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program.as_ref());
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(cwd) = cwd {
        cmd.current_dir(cwd);
    }

    let deadline = start + timeout;
    let mut child = cmd.spawn()?;
    let stdout = child.stdout.take().map(spawn_reader);
    let stderr = child.stderr.take().map(spawn_reader);

    let status = match wait_with_deadline(&mut child, deadline)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait();
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("timed out after {}s", timeout.as_secs()),
            ));
        }
    };

    // Background processes may keep the pipes open after the child exits
    let stdout = stdout
        .map(|rx| collect_output(rx, deadline))
        .unwrap_or_default();
    let stderr = stderr
        .map(|rx| collect_output(rx, deadline))
        .unwrap_or_default();

    Ok(CommandResult {
        exit_code: status.code(),
        stdout,
        stderr,
        duration: start.elapsed(),
        success: status.success(),
    })
}

/// Run a command line through the platform shell.
///
/// Unlike [`run_program`], failures are converted to [`DiagError`]s: a
/// shell that cannot be spawned is [`DiagError::CommandFailed`] and an
/// expired budget is [`DiagError::CommandTimedOut`]. A non-zero exit is
/// returned as a normal [`CommandResult`].
pub fn execute(command: &str, cwd: Option<&Path>, timeout: Duration) -> Result<CommandResult> {
    let (shell, flag) = shell_invocation();
    tracing::debug!("Executing via {}: {}", shell, command);

    let result = run_program(&shell, &[flag, command], cwd, timeout).map_err(|e| {
        if e.kind() == io::ErrorKind::TimedOut {
            DiagError::CommandTimedOut {
                command: command.to_string(),
                seconds: timeout.as_secs(),
            }
        } else {
            DiagError::CommandFailed {
                command: command.to_string(),
                code: None,
            }
        }
    })?;
    tracing::debug!(
        "'{}' exited with {:?} after {:?}",
        command,
        result.exit_code,
        result.duration
    );
    Ok(result)
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut buf = [0u8; 4096];
        loop {
            match pipe.read(&mut buf) {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    if tx.send(buf[..n].to_vec()).is_err() {
                        break;
                    }
                }
            }
        }
    });
    rx
}

/// Drain a reader until its pipe closes or `deadline` passes.
///
/// On expiry the reader thread is abandoned and whatever arrived so far is
/// returned.
fn collect_output(rx: Receiver<Vec<u8>>, deadline: Instant) -> String {
    let mut buf = Vec::new();
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match rx.recv_timeout(remaining) {
            Ok(chunk) => buf.extend_from_slice(&chunk),
            Err(RecvTimeoutError::Timeout) => {
                tracing::debug!("Output pipe still open at deadline; not waiting further");
                break;
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}

fn wait_with_deadline(
    child: &mut Child,
    deadline: Instant,
) -> io::Result<Option<std::process::ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(Duration::from_millis(20));
    }
}

/// Shell used for command lines, with the flag that takes a command string.
fn shell_invocation() -> (String, &'static str) {
    if cfg!(target_os = "windows") {
        (
            std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string()),
            "/C",
        )
    } else {
        ("/bin/sh".to_string(), "-c")
    }
}
