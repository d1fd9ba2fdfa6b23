//! Captured-result command execution.
//!
//! Every external command invocation returns a [`CmdResult`] carrying exit
//! status and captured output rather than propagating a failure. Callers
//! branch on the captured content; a command that could not even be spawned
//! is reported through the `error` field.

use log::*;
use tokio::process::Command;

/// Captured outcome of a single command invocation.
#[derive(Debug, Clone, Default)]
pub struct CmdResult {
    /// Process exit code, if the process ran and exited normally.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Spawn-level failure (e.g. binary not found).
    pub error: Option<String>,
}

impl CmdResult {
    /// True when the process ran and exited zero.
    pub fn success(&self) -> bool {
        self.status == Some(0) && self.error.is_none()
    }
}

/// Run a command and capture its output. Never returns an error: spawn
/// failures are folded into the result so orchestration logic can interpret
/// every outcome uniformly.
pub async fn run_captured(program: &str, args: &[&str]) -> CmdResult {
    debug!("executing: {} {}", program, args.join(" "));

    match Command::new(program).args(args).output().await {
        Ok(output) => {
            let result = CmdResult {
                status: output.status.code(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
                error: None,
            };

            if !result.success() {
                debug!(
                    "{} exited with {:?}: {}",
                    program,
                    result.status,
                    result.stderr.trim()
                );
            }

            result
        }
        Err(err) => CmdResult {
            status: None,
            stdout: String::new(),
            stderr: String::new(),
            error: Some(err.to_string()),
        },
    }
}
