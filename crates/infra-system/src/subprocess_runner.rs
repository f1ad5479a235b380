// Subprocess runner implementation
// reason: tokio for async process management, kill_on_drop for bounded waits
use async_trait::async_trait;
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

use droidprobe_core::domain::{Invocation, RawResponse, ToolConfig};
use droidprobe_core::port::CommandRunner;

/// Why an invocation produced no result
///
/// Only logged; callers of [`CommandRunner::run`] see `RawResponse::Absent`
/// whatever the cause.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("Exited with status {0:?}")]
    NonZeroExit(Option<i32>),

    #[error("Process timeout after {0}ms")]
    Timeout(u128),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Subprocess runner
///
/// Spawns the program directly with an argument vector (no shell), inherits
/// the caller's environment and merges stdout and stderr into one text.
pub struct SubprocessRunner {
    timeout: Option<Duration>,
}

impl SubprocessRunner {
    /// Create a new subprocess runner
    ///
    /// # Arguments
    /// * `timeout` - Upper bound per invocation; `None` waits until the tool exits
    ///
    /// # Example
    /// ```ignore
    /// let runner = SubprocessRunner::new(Some(Duration::from_secs(10)));
    /// ```
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// Runner honoring the configured per-invocation timeout
    pub fn from_config(tools: &ToolConfig) -> Self {
        Self::new(tools.timeout)
    }

    /// Spawn child process and wait for output
    async fn spawn_and_wait(&self, invocation: &Invocation) -> Result<Output, RunError> {
        let child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            // Dropping the wait future on timeout must not leave the tool running
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| RunError::SpawnFailed(e.to_string()))?;

        if let Some(limit) = self.timeout {
            match timeout(limit, child.wait_with_output()).await {
                Ok(Ok(output)) => Ok(output),
                Ok(Err(e)) => Err(RunError::IoError(e.to_string())),
                Err(_) => Err(RunError::Timeout(limit.as_millis())),
            }
        } else {
            child
                .wait_with_output()
                .await
                .map_err(|e| RunError::IoError(e.to_string()))
        }
    }

    /// Run to completion and return the merged, trimmed output
    async fn execute_internal(&self, invocation: &Invocation) -> Result<String, RunError> {
        let start = Instant::now();

        let output = self.spawn_and_wait(invocation).await?;

        debug!(
            command = %invocation,
            duration_ms = %start.elapsed().as_millis(),
            exit_code = ?output.status.code(),
            "Subprocess execution completed"
        );

        if !output.status.success() {
            return Err(RunError::NonZeroExit(output.status.code()));
        }

        Ok(merge_output(&output))
    }
}

impl Default for SubprocessRunner {
    fn default() -> Self {
        Self::new(None)
    }
}

/// stdout followed by stderr, trimmed
///
/// fastboot prints `getvar` answers on stderr, so both streams matter.
fn merge_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    match (stdout.trim(), stderr.trim()) {
        ("", err) => err.to_string(),
        (out, "") => out.to_string(),
        (out, err) => format!("{}\n{}", out, err),
    }
}

#[async_trait]
impl CommandRunner for SubprocessRunner {
    async fn run(&self, invocation: &Invocation) -> RawResponse {
        match self.execute_internal(invocation).await {
            Ok(text) => RawResponse::captured(text),
            Err(e) => {
                debug!(command = %invocation, error = %e, "Subprocess produced no result");
                RawResponse::Absent
            }
        }
    }
}
