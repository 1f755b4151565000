//! Hardened command execution
//!
//! Runs one external command with:
//! - Piped stdout/stderr drained concurrently (a full pipe on one stream can
//!   never deadlock the other)
//! - Stdin wired to the null device so children can't block on our input
//! - Optional timeout with SIGTERM → grace window → SIGKILL escalation
//! - Byte-exact output capture, decoded lazily and lossily
//!
//! Every invocation owns its process and pipes exclusively; pipes are closed
//! and the child reaped on every exit path.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::process::{CommandSpec, OutputCapture, ProcessResult};

/// Default delay between the graceful termination request and the forced
/// kill when a timeout expires
pub const DEFAULT_GRACE_WINDOW: Duration = Duration::from_secs(2);

/// Upper bound on the final pipe drain after a timeout kill; an orphaned
/// grandchild holding the write end must not hang the call
const DRAIN_AFTER_KILL: Duration = Duration::from_millis(500);

/// Run a command with a default-configured [`ProcessRunner`]
pub async fn run_command(spec: &CommandSpec) -> Result<ProcessResult> {
    ProcessRunner::new().run(spec).await
}

/// Blocking wrapper around [`run_command`] for non-async callers
pub fn run_command_blocking(spec: &CommandSpec) -> Result<ProcessResult> {
    ProcessRunner::new().run_blocking(spec)
}

/// Executes external commands with caller-supplied defaults
///
/// Defaults (working directory, base environment, timeout, grace window) are
/// merged under each [`CommandSpec`]: the spec always wins where it sets a
/// value. The runner holds no other state; concurrent `run` calls are
/// independent.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    working_dir: Option<PathBuf>,
    env: HashMap<String, String>,
    default_timeout: Option<Duration>,
    grace_window: Duration,
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessRunner {
    /// Create a runner with no defaults
    pub fn new() -> Self {
        Self {
            working_dir: None,
            env: HashMap::new(),
            default_timeout: None,
            grace_window: DEFAULT_GRACE_WINDOW,
        }
    }

    /// Set a default timeout applied to specs that carry none
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = Some(timeout);
        self
    }

    /// Set a default working directory applied to specs that carry none
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Add a base environment variable; spec overrides win on conflict
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    /// Set the grace window between SIGTERM and SIGKILL on timeout
    pub fn with_grace_window(mut self, grace: Duration) -> Self {
        self.grace_window = grace;
        self
    }

    /// Run a command to completion
    ///
    /// # Errors
    /// * `Error::EmptyCommand` - spec has no program; nothing is launched
    /// * `Error::Launch` - the program could not be spawned; no partial output
    /// * `Error::Timeout` - deadline expired; the process was killed and the
    ///   error carries whatever output was captured
    /// * `Error::Signal` - the process died to a signal this runner did not
    ///   send
    pub async fn run(&self, spec: &CommandSpec) -> Result<ProcessResult> {
        let argv = spec.argv();
        if argv.is_empty() {
            return Err(Error::EmptyCommand);
        }
        let command_line = spec.to_string();

        let mut cmd = Command::new(&argv[0]);
        cmd.args(&argv[1..]);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        if let Some(dir) = spec.working_dir().or(self.working_dir.as_deref()) {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        for (key, value) in spec.env_overrides() {
            cmd.env(key, value);
        }

        tracing::debug!("executing: {}", command_line);
        let start = Instant::now();

        let mut child = cmd.spawn().map_err(|source| Error::Launch {
            command: command_line.clone(),
            source,
        })?;

        let stdout_drain = Drain::spawn(child.stdout.take());
        let stderr_drain = Drain::spawn(child.stderr.take());

        let limit = spec.deadline().or(self.default_timeout);
        let status = if let Some(limit) = limit {
            match timeout(limit, child.wait()).await {
                Ok(status) => status?,
                Err(_) => {
                    self.shutdown(&mut child).await?;
                    let stdout = stdout_drain.finish_within(DRAIN_AFTER_KILL).await;
                    let stderr = stderr_drain.finish_within(DRAIN_AFTER_KILL).await;
                    return Err(Error::Timeout {
                        command: command_line,
                        limit,
                        stdout,
                        stderr,
                        duration: start.elapsed(),
                    });
                }
            }
        } else {
            child.wait().await?
        };

        let stdout = stdout_drain.finish().await;
        let stderr = stderr_drain.finish().await;
        let duration = start.elapsed();

        match status.code() {
            Some(exit_code) => Ok(ProcessResult {
                exit_code,
                stdout,
                stderr,
                duration,
                timed_out: false,
            }),
            None => Err(Error::Signal {
                command: command_line,
                signal: termination_signal(&status),
                stdout,
                stderr,
                duration,
            }),
        }
    }

    /// Blocking wrapper around [`ProcessRunner::run`] for non-async callers
    pub fn run_blocking(&self, spec: &CommandSpec) -> Result<ProcessResult> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| {
                Error::Io(std::io::Error::other(format!(
                    "failed to create runtime: {}",
                    e
                )))
            })?;

        rt.block_on(self.run(spec))
    }

    /// Terminate a timed-out child: graceful signal first, forced kill after
    /// the grace window. The child is reaped before this returns.
    async fn shutdown(&self, child: &mut Child) -> Result<()> {
        #[cfg(unix)]
        if let Some(pid) = child.id() {
            tracing::debug!("deadline expired, sending SIGTERM to pid {}", pid);
            // SAFETY: pid refers to our own un-reaped child.
            unsafe {
                libc::kill(pid as libc::pid_t, libc::SIGTERM);
            }
            if let Ok(status) = timeout(self.grace_window, child.wait()).await {
                status?;
                return Ok(());
            }
            tracing::debug!("grace window elapsed, killing pid {}", pid);
        }

        child.kill().await?;
        Ok(())
    }
}

/// One stream's drain task plus the buffer it fills
///
/// The buffer is shared so a timeout can hand back whatever bytes have
/// arrived even if the reader has not hit EOF yet.
struct Drain {
    buf: Arc<Mutex<Vec<u8>>>,
    task: JoinHandle<()>,
}

impl Drain {
    fn spawn<R>(stream: Option<R>) -> Self
    where
        R: tokio::io::AsyncRead + Unpin + Send + 'static,
    {
        let buf = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&buf);
        let task = tokio::spawn(async move {
            let Some(mut stream) = stream else {
                return;
            };
            let mut chunk = [0u8; 8192];
            loop {
                match stream.read(&mut chunk).await {
                    Ok(0) => break,
                    Ok(n) => sink.lock().await.extend_from_slice(&chunk[..n]),
                    Err(e) => {
                        tracing::warn!("error draining output: {}", e);
                        break;
                    }
                }
            }
        });

        Self { buf, task }
    }

    /// Wait for EOF, then take the captured bytes
    async fn finish(self) -> OutputCapture {
        if let Err(e) = self.task.await {
            tracing::warn!("output drain task failed: {}", e);
        }
        OutputCapture::from(std::mem::take(&mut *self.buf.lock().await))
    }

    /// Wait for EOF at most `limit`, then take whatever was captured
    async fn finish_within(mut self, limit: Duration) -> OutputCapture {
        if timeout(limit, &mut self.task).await.is_err() {
            self.task.abort();
        }
        OutputCapture::from(std::mem::take(&mut *self.buf.lock().await))
    }
}

#[cfg(unix)]
fn termination_signal(status: &std::process::ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status.signal().unwrap_or(-1)
}

#[cfg(not(unix))]
fn termination_signal(_status: &std::process::ExitStatus) -> i32 {
    -1
}
