// src/core/sandbox.rs — Run an untrusted program in a subprocess with a deadline
//
// The source is written to a uniquely named temp file, executed by a fresh
// interpreter process, and the file is removed on every exit path (the
// NamedTempFile guard drops at the end of `run`). A child still running at
// the deadline is killed.

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;

use super::types::{ExecutionResult, LAUNCH_FAILURE_EXIT_CODE};
use crate::infra::config::ExecutionConfig;

const SCRIPT_PREFIX: &str = "autocoder-";
const SCRIPT_SUFFIX: &str = ".py";

pub struct SandboxRunner {
    interpreter: String,
    timeout: Duration,
    treat_timeout_as_success: bool,
    script_dir: Option<PathBuf>,
}

impl SandboxRunner {
    pub fn new(
        interpreter: impl Into<String>,
        timeout: Duration,
        treat_timeout_as_success: bool,
    ) -> Self {
        Self {
            interpreter: interpreter.into(),
            timeout,
            treat_timeout_as_success,
            script_dir: None,
        }
    }

    /// Write temp scripts under `dir` instead of the system temp dir.
    pub fn with_script_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.script_dir = Some(dir.into());
        self
    }

    pub fn from_config(config: &ExecutionConfig) -> Self {
        let runner = Self::new(
            config.interpreter.clone(),
            Duration::from_secs(config.timeout_seconds),
            config.treat_timeout_as_success,
        );
        match &config.script_dir {
            Some(dir) => runner.with_script_dir(dir),
            None => runner,
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Execute `code` and capture exit status, stdout and stderr.
    ///
    /// Never fails: launch problems come back as exit code -1 with the error
    /// text on stderr.
    pub async fn run(&self, code: &str) -> ExecutionResult {
        let script = match self.write_script(code) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Could not write temp script: {e}");
                return ExecutionResult::launch_failure(e.to_string());
            }
        };

        tracing::debug!(
            "Running: {} {} (timeout {:?})",
            self.interpreter,
            script.path().display(),
            self.timeout
        );

        let child = Command::new(&self.interpreter)
            .arg(script.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();

        let child = match child {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Could not launch {}: {e}", self.interpreter);
                return ExecutionResult::launch_failure(format!(
                    "failed to launch '{}': {e}",
                    self.interpreter
                ));
            }
        };

        // Dropping the wait future on timeout drops the child, which kills it.
        match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => ExecutionResult {
                exit_code: output.status.code().unwrap_or(LAUNCH_FAILURE_EXIT_CODE),
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                timed_out: false,
            },
            Ok(Err(e)) => ExecutionResult::launch_failure(e.to_string()),
            Err(_) => {
                tracing::info!("Program still running after {:?}, stopped", self.timeout);
                if self.treat_timeout_as_success {
                    ExecutionResult::timed_out_success()
                } else {
                    ExecutionResult::timed_out_failure(self.timeout.as_secs_f64())
                }
            }
        }
    }

    fn write_script(&self, code: &str) -> std::io::Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(SCRIPT_PREFIX).suffix(SCRIPT_SUFFIX);
        let mut file = match &self.script_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(code.as_bytes())?;
        file.flush()?;
        Ok(file)
    }
}
