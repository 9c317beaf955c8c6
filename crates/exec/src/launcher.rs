//! [`ProcessLauncher`] over `std::process`.

use std::io::{self, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use compile::{ExecutionOutcome, InvocationFailure, ProcessDescription, ProcessLauncher, Timestamp};
use tracing::{debug, warn};

/// How long output is drained after the process has exited, by default.
pub const DEFAULT_DRAIN_TIMEOUT: Duration = Duration::from_millis(500);

/// Starts processes with [`std::process::Command`] and blocks until they exit.
///
/// Standard output and standard error are captured. Standard input is closed.
///
/// Once the process has exited, its output streams are drained for at most the
/// drain timeout. A background process that inherited the pipes can keep them
/// open indefinitely; whatever was read by then is returned.
#[derive(Debug, Clone, Copy)]
pub struct StdProcessLauncher {
    drain_timeout: Duration,
}

impl StdProcessLauncher {
    /// Creates a launcher with [`DEFAULT_DRAIN_TIMEOUT`].
    pub fn new() -> Self {
        Self {
            drain_timeout: DEFAULT_DRAIN_TIMEOUT,
        }
    }

    /// Sets how long output is drained after the process has exited.
    pub fn with_drain_timeout(mut self, drain_timeout: Duration) -> Self {
        self.drain_timeout = drain_timeout;
        self
    }
}

impl Default for StdProcessLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLauncher for StdProcessLauncher {
    fn launch(
        &self,
        description: &ProcessDescription,
    ) -> Result<ExecutionOutcome, InvocationFailure> {
        let fail =
            |source: io::Error| InvocationFailure::new(description.executable().clone(), source);

        let started_at = Timestamp::now();
        let child = Command::new(description.executable().as_path())
            .args(description.arguments())
            .current_dir(description.working_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(fail)?;
        debug!(pid = child.id(), executable = %description.executable(), "Spawned process");

        let mut child = ChildGuard::new(child);
        let stdout = PipeReader::spawn(child.child.stdout.take());
        let stderr = PipeReader::spawn(child.child.stderr.take());

        let status = child.wait().map_err(fail)?;
        let finished_at = Timestamp::now();

        let deadline = Instant::now() + self.drain_timeout;
        let stdout = stdout.finish(deadline).map_err(fail)?;
        let stderr = stderr.finish(deadline).map_err(fail)?;

        let exit_status = exit_status_code(status);
        debug!(exit_status, "Process exited");

        if exit_status != 0 && !description.ignore_exit_value() {
            return Err(fail(io::Error::other(format!(
                "process exited with non-zero exit status {exit_status}"
            ))));
        }

        Ok(ExecutionOutcome {
            exit_status,
            stdout,
            stderr,
            started_at,
            finished_at,
        })
    }
}

/// Owns a spawned child; kills and reaps it on drop unless it was awaited.
struct ChildGuard {
    child: Child,
    reaped: bool,
}

impl ChildGuard {
    fn new(child: Child) -> Self {
        Self {
            child,
            reaped: false,
        }
    }

    fn wait(&mut self) -> io::Result<ExitStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status)
    }
}

impl Drop for ChildGuard {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Reads one output pipe on a background thread into a shared buffer.
struct PipeReader {
    buffer: Arc<Mutex<Vec<u8>>>,
    done: Receiver<io::Result<()>>,
}

impl PipeReader {
    fn spawn<R>(pipe: Option<R>) -> Self
    where
        R: Read + Send + 'static,
    {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let (tx, done) = mpsc::channel();
        let sink = Arc::clone(&buffer);
        std::thread::spawn(move || {
            let result = match pipe {
                Some(pipe) => copy_into(pipe, &sink),
                None => Ok(()),
            };
            let _ = tx.send(result);
        });
        Self { buffer, done }
    }

    /// Waits until the pipe reaches end of file or `deadline` passes, then
    /// returns what has been read.
    fn finish(self, deadline: Instant) -> io::Result<String> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match self.done.recv_timeout(remaining) {
            Ok(result) => result?,
            Err(RecvTimeoutError::Timeout) => {
                warn!("Output pipe still open after process exit; returning partial output");
            }
            Err(RecvTimeoutError::Disconnected) => {
                return Err(io::Error::other("output reader thread panicked"));
            }
        }
        let bytes = self
            .buffer
            .lock()
            .map_err(|_| io::Error::other("output buffer poisoned"))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn copy_into<R: Read>(mut pipe: R, sink: &Mutex<Vec<u8>>) -> io::Result<()> {
    let mut chunk = [0u8; 8192];
    loop {
        match pipe.read(&mut chunk) {
            Ok(0) => return Ok(()),
            Ok(n) => sink
                .lock()
                .map_err(|_| io::Error::other("output buffer poisoned"))?
                .extend_from_slice(&chunk[..n]),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Exit code of a terminated process.
///
/// A process killed by a signal has no exit code on Unix; it is reported as
/// `128 + signal`, the shell convention.
fn exit_status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt as _;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}
