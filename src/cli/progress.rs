// src/cli/progress.rs — Colored terminal progress for the generation loop

use crossterm::style::Stylize;

use crate::core::types::{ProgressEvent, RequestMode};

/// Render an event as the plain text shown to the user.
pub fn format_event(event: &ProgressEvent) -> String {
    match event {
        ProgressEvent::RunStart {
            prompt,
            iterations,
            timeout_secs,
        } => {
            let mut s = format!(
                "Starting code generation for prompt: {prompt}\nNumber of iterations: {iterations}"
            );
            if let Some(t) = timeout_secs {
                s.push_str(&format!(
                    "\nNote: Reaching the {t}s timeout means the program is running successfully!"
                ));
            }
            s
        }
        ProgressEvent::IterationStart {
            iteration,
            max_iterations,
            mode,
        } => {
            let verb = match mode {
                RequestMode::Generate => "Generating",
                RequestMode::Improve => "Improving",
            };
            format!("\n{verb} code - Iteration {}/{}...", iteration + 1, max_iterations)
        }
        ProgressEvent::Testing { fixed: false } => "\nTesting code execution...".into(),
        ProgressEvent::Testing { fixed: true } => "\nTesting fixed code...".into(),
        ProgressEvent::ExecutionSucceeded { stdout, timed_out } => {
            let mut s = String::new();
            if *timed_out {
                s.push_str("Program running (timeout reached) - This is normal for continuous processes!\n");
            }
            if !stdout.is_empty() {
                s.push_str("Program output:\n");
                s.push_str(stdout.trim_end());
                s.push('\n');
            }
            s.push_str("Code execution successful!");
            s
        }
        ProgressEvent::ExecutionFailed { stderr } => {
            format!("Code execution failed with error:\n{}", stderr.trim_end())
        }
        ProgressEvent::FixAttempt => "\nAttempting to fix code errors...".into(),
        ProgressEvent::Saved { path } => format!("Code saved to: {}", path.display()),
        ProgressEvent::Skipped { iteration, reason } => {
            format!("Iteration {} skipped: {reason}", iteration + 1)
        }
        ProgressEvent::Complete { saved, iterations } => format!(
            "\nCode generation and improvement completed! ({saved}/{iterations} iterations saved)"
        ),
    }
}

/// Build a progress callback that writes colored output to stderr.
pub fn terminal_progress() -> impl Fn(ProgressEvent) + Send + 'static {
    move |event| {
        let line = format_event(&event);
        let styled = match event {
            ProgressEvent::RunStart { .. } | ProgressEvent::Testing { .. } => line.cyan(),
            ProgressEvent::IterationStart {
                mode: RequestMode::Generate,
                ..
            } => line.cyan(),
            ProgressEvent::IterationStart { .. } | ProgressEvent::FixAttempt => line.yellow(),
            ProgressEvent::ExecutionSucceeded { .. }
            | ProgressEvent::Saved { .. }
            | ProgressEvent::Complete { .. } => line.green(),
            ProgressEvent::ExecutionFailed { .. } | ProgressEvent::Skipped { .. } => line.red(),
        };
        eprintln!("{styled}");
    }
}
