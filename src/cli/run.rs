// src/cli/run.rs — Default command: run the generation loop

use std::sync::Arc;

use crate::core::orchestrator::Orchestrator;
use crate::core::types::RunSummary;
use crate::infra::config::Config;
use crate::provider::ModelProvider;
use crate::util::truncate_str;

/// Run every configured iteration against `provider`.
pub async fn run_generation(
    provider: Arc<dyn ModelProvider>,
    config: &Config,
    quiet: bool,
) -> anyhow::Result<RunSummary> {
    tracing::info!(
        provider = provider.id(),
        model = %config.model.model,
        prompt = truncate_str(&config.generation.prompt, 80),
        iterations = config.generation.iterations,
        execute = config.execution.enabled,
        fix = config.execution.enabled && config.fix.enabled,
        "Starting generation loop"
    );

    let mut orchestrator = Orchestrator::new(provider, config);
    if !quiet {
        orchestrator = orchestrator.with_progress(super::progress::terminal_progress());
    }

    let summary = orchestrator.run().await;

    if quiet {
        for path in summary.saved_paths() {
            println!("{}", path.display());
        }
    }

    Ok(summary)
}
