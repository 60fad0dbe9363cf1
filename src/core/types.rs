// src/core/types.rs — Core domain types

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Exit code reported when the interpreter could not be launched at all.
pub const LAUNCH_FAILURE_EXIT_CODE: i32 = -1;

/// Exit code reported for a timeout when timeouts are not treated as success.
pub const TIMEOUT_EXIT_CODE: i32 = 124;

/// Outcome of running one program in the sandbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl ExecutionResult {
    pub fn launch_failure(message: impl Into<String>) -> Self {
        Self {
            exit_code: LAUNCH_FAILURE_EXIT_CODE,
            stdout: String::new(),
            stderr: message.into(),
            timed_out: false,
        }
    }

    /// A program still running at the deadline, accepted as working.
    pub fn timed_out_success() -> Self {
        Self {
            exit_code: 0,
            stdout: String::new(),
            stderr: String::new(),
            timed_out: true,
        }
    }

    pub fn timed_out_failure(timeout_secs: f64) -> Self {
        Self {
            exit_code: TIMEOUT_EXIT_CODE,
            stdout: String::new(),
            stderr: format!("program timed out after {timeout_secs}s"),
            timed_out: true,
        }
    }

    /// Runtime failure that warrants a fix attempt: non-zero exit with
    /// something on stderr. A non-zero exit with empty stderr is accepted.
    pub fn needs_fix(&self) -> bool {
        self.exit_code != 0 && !self.stderr.is_empty()
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// How the model was asked for code in a given iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestMode {
    Generate,
    Improve,
}

impl std::fmt::Display for RequestMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestMode::Generate => write!(f, "generate"),
            RequestMode::Improve => write!(f, "improve"),
        }
    }
}

/// Why an iteration produced no saved file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// The generate/improve request failed (network, HTTP, malformed body).
    ModelFailed(String),
    /// The response had no `<code>` block.
    NoCode,
    /// Runtime error and fixing is disabled.
    RuntimeError,
    /// The fix request itself failed.
    FixFailed(String),
    /// The fix response had no `<code>` block.
    NoFixedCode,
    /// The fixed program still exits non-zero.
    FixStillFailing,
    /// Writing the file failed.
    SaveFailed(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::ModelFailed(e) => write!(f, "model request failed: {e}"),
            SkipReason::NoCode => write!(f, "no code found in the response"),
            SkipReason::RuntimeError => write!(f, "program failed and fixing is disabled"),
            SkipReason::FixFailed(e) => write!(f, "fix request failed: {e}"),
            SkipReason::NoFixedCode => write!(f, "no fixed code found in the response"),
            SkipReason::FixStillFailing => write!(f, "fixed code still has errors"),
            SkipReason::SaveFailed(e) => write!(f, "could not save code: {e}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IterationOutcome {
    Saved { path: PathBuf, fixed: bool },
    Skipped(SkipReason),
}

impl IterationOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, IterationOutcome::Saved { .. })
    }
}

/// Everything observed during one iteration. Kept in memory only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Zero-based, matches the saved file name.
    pub iteration: u32,
    pub mode: RequestMode,
    /// The last code extracted in this iteration (fixed code if a fix was extracted).
    pub code: Option<String>,
    /// Result of the last execution attempt, if the program was run.
    pub execution: Option<ExecutionResult>,
    pub outcome: IterationOutcome,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunSummary {
    pub records: Vec<IterationRecord>,
}

impl RunSummary {
    pub fn saved_paths(&self) -> Vec<&PathBuf> {
        self.records
            .iter()
            .filter_map(|r| match &r.outcome {
                IterationOutcome::Saved { path, .. } => Some(path),
                IterationOutcome::Skipped(_) => None,
            })
            .collect()
    }

    pub fn saved_count(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_saved()).count()
    }
}

/// Progress events emitted by the orchestrator for real-time display.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    RunStart {
        prompt: String,
        iterations: u32,
        timeout_secs: Option<u64>,
    },
    IterationStart {
        iteration: u32,
        max_iterations: u32,
        mode: RequestMode,
    },
    Testing {
        fixed: bool,
    },
    ExecutionSucceeded {
        stdout: String,
        timed_out: bool,
    },
    ExecutionFailed {
        stderr: String,
    },
    FixAttempt,
    Saved {
        path: PathBuf,
    },
    Skipped {
        iteration: u32,
        reason: SkipReason,
    },
    Complete {
        saved: usize,
        iterations: u32,
    },
}
