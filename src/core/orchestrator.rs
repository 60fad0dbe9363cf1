// src/core/orchestrator.rs — Generate / test / fix / save loop

use std::sync::Arc;
use std::time::Duration;

use super::extractor::extract_code;
use super::fixer::ErrorFixer;
use super::persister::CodePersister;
use super::prompts;
use super::sandbox::SandboxRunner;
use super::types::*;
use crate::infra::config::Config;
use crate::infra::errors::AutoCoderError;
use crate::provider::{ChatRequest, ModelProvider};

/// Drives a fixed number of iterations. Iteration 0 generates from the
/// prompt; later iterations ask the model to improve the current code.
///
/// Nothing that happens inside an iteration aborts the run: every failure
/// is recorded as a skip and the loop moves on.
pub struct Orchestrator {
    provider: Arc<dyn ModelProvider>,
    model: String,
    prompt: String,
    iterations: u32,
    iteration_delay: Duration,
    /// `None` when execution is disabled; code is then saved untested.
    runner: Option<SandboxRunner>,
    /// `None` when fixing is disabled.
    fixer: Option<ErrorFixer>,
    persister: CodePersister,
    on_progress: Option<Box<dyn Fn(ProgressEvent) + Send>>,
}

impl Orchestrator {
    pub fn new(provider: Arc<dyn ModelProvider>, config: &Config) -> Self {
        let runner = config
            .execution
            .enabled
            .then(|| SandboxRunner::from_config(&config.execution));
        let fixer = (config.execution.enabled && config.fix.enabled)
            .then(|| ErrorFixer::new(provider.clone(), config.model.model.clone(), &config.fix));

        Self {
            provider,
            model: config.model.model.clone(),
            prompt: config.generation.prompt.clone(),
            iterations: config.generation.iterations,
            iteration_delay: Duration::from_millis(config.generation.iteration_delay_ms),
            runner,
            fixer,
            persister: CodePersister::from_config(&config.generation),
            on_progress: None,
        }
    }

    /// Set a callback for real-time progress events.
    pub fn with_progress(mut self, cb: impl Fn(ProgressEvent) + Send + 'static) -> Self {
        self.on_progress = Some(Box::new(cb));
        self
    }

    fn emit(&self, event: ProgressEvent) {
        if let Some(ref cb) = self.on_progress {
            cb(event);
        }
    }

    /// Run every iteration and return what happened in each.
    pub async fn run(&mut self) -> RunSummary {
        self.emit(ProgressEvent::RunStart {
            prompt: self.prompt.clone(),
            iterations: self.iterations,
            timeout_secs: self.runner.as_ref().map(|r| r.timeout().as_secs()),
        });

        let mut summary = RunSummary::default();
        let mut current: Option<String> = None;

        for i in 0..self.iterations {
            let record = self.run_iteration(i, &mut current).await;

            match &record.outcome {
                IterationOutcome::Saved { path, fixed } => {
                    tracing::info!(iteration = i, fixed = *fixed, "Saved {}", path.display());
                    self.emit(ProgressEvent::Saved { path: path.clone() });
                }
                IterationOutcome::Skipped(reason) => {
                    tracing::warn!(iteration = i, "Iteration skipped: {reason}");
                    self.emit(ProgressEvent::Skipped {
                        iteration: i,
                        reason: reason.clone(),
                    });
                }
            }

            let attempted_save = matches!(
                record.outcome,
                IterationOutcome::Saved { .. } | IterationOutcome::Skipped(SkipReason::SaveFailed(_))
            );
            summary.records.push(record);

            if attempted_save && !self.iteration_delay.is_zero() {
                tokio::time::sleep(self.iteration_delay).await;
            }
        }

        self.emit(ProgressEvent::Complete {
            saved: summary.saved_count(),
            iterations: self.iterations,
        });
        summary
    }

    async fn run_iteration(&self, iteration: u32, current: &mut Option<String>) -> IterationRecord {
        let mode = match current {
            Some(_) if iteration > 0 => RequestMode::Improve,
            _ => RequestMode::Generate,
        };
        self.emit(ProgressEvent::IterationStart {
            iteration,
            max_iterations: self.iterations,
            mode,
        });

        let response = match self.request_code(mode, current.as_deref()).await {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(retriable = e.is_retriable(), "Model request failed: {e}");
                return record(iteration, mode, None, None, SkipReason::ModelFailed(e.to_string()));
            }
        };

        let Some(extracted) = extract_code(&response) else {
            return record(iteration, mode, None, None, SkipReason::NoCode);
        };
        let mut code = extracted.to_string();
        *current = Some(code.clone());

        let mut execution = None;
        let mut fixed = false;

        if let Some(runner) = &self.runner {
            self.emit(ProgressEvent::Testing { fixed: false });
            let result = runner.run(&code).await;

            if result.needs_fix() {
                self.emit(ProgressEvent::ExecutionFailed {
                    stderr: result.stderr.clone(),
                });
                let Some(fixer) = &self.fixer else {
                    return record(iteration, mode, Some(code), Some(result), SkipReason::RuntimeError);
                };

                self.emit(ProgressEvent::FixAttempt);
                let fix_response = match fixer.fix(&code, &result.stderr).await {
                    Ok(r) => r,
                    Err(e) => {
                        tracing::debug!(retriable = e.is_retriable(), "Fix request failed: {e}");
                        return record(
                            iteration,
                            mode,
                            Some(code),
                            Some(result),
                            SkipReason::FixFailed(e.to_string()),
                        );
                    }
                };
                let Some(fixed_code) = extract_code(&fix_response) else {
                    return record(iteration, mode, Some(code), Some(result), SkipReason::NoFixedCode);
                };
                code = fixed_code.to_string();
                *current = Some(code.clone());

                self.emit(ProgressEvent::Testing { fixed: true });
                let retest = runner.run(&code).await;
                if !retest.succeeded() {
                    return record(
                        iteration,
                        mode,
                        Some(code),
                        Some(retest),
                        SkipReason::FixStillFailing,
                    );
                }
                fixed = true;
                self.emit(ProgressEvent::ExecutionSucceeded {
                    stdout: retest.stdout.clone(),
                    timed_out: retest.timed_out,
                });
                execution = Some(retest);
            } else {
                self.emit(ProgressEvent::ExecutionSucceeded {
                    stdout: result.stdout.clone(),
                    timed_out: result.timed_out,
                });
                execution = Some(result);
            }
        }

        let outcome = match self.persister.save(&code, iteration) {
            Ok(path) => IterationOutcome::Saved { path, fixed },
            Err(e) => IterationOutcome::Skipped(SkipReason::SaveFailed(e.to_string())),
        };

        IterationRecord {
            iteration,
            mode,
            code: Some(code),
            execution,
            outcome,
        }
    }

    async fn request_code(
        &self,
        mode: RequestMode,
        current: Option<&str>,
    ) -> Result<String, AutoCoderError> {
        let user = match (mode, current) {
            (RequestMode::Improve, Some(code)) => prompts::improve_message(code),
            _ => prompts::generate_message(&self.prompt),
        };
        let request = ChatRequest::system_and_user(self.model.clone(), prompts::SYSTEM_PROMPT, user);
        let response = self.provider.chat(request).await?;
        tracing::debug!(
            mode = %mode,
            tokens = response.usage.total(),
            "Model responded with {} chars",
            response.content.len()
        );
        Ok(response.content)
    }
}

fn record(
    iteration: u32,
    mode: RequestMode,
    code: Option<String>,
    execution: Option<ExecutionResult>,
    reason: SkipReason,
) -> IterationRecord {
    IterationRecord {
        iteration,
        mode,
        code,
        execution,
        outcome: IterationOutcome::Skipped(reason),
    }
}
