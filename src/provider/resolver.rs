// src/provider/resolver.rs — Build the configured provider from env credentials

use std::sync::Arc;

use super::openai_compat::OpenAICompatProvider;
use super::ModelProvider;
use crate::infra::config::{ModelConfig, ProviderKind};
use crate::infra::errors::AutoCoderError;

/// Construct the provider named in `config`, reading its API key from the
/// process environment. Failure here is fatal for the run.
pub fn build_provider(config: &ModelConfig) -> Result<Arc<dyn ModelProvider>, AutoCoderError> {
    build_provider_with(config, |var| std::env::var(var).ok())
}

/// Same as [`build_provider`] with an explicit key lookup.
pub fn build_provider_with(
    config: &ModelConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Arc<dyn ModelProvider>, AutoCoderError> {
    let var = config.resolved_api_key_env();
    let key = lookup(&var)
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .ok_or(AutoCoderError::MissingApiKey { var: var.clone() })?;

    let base_url = config.resolved_base_url().ok_or_else(|| {
        AutoCoderError::Config(format!(
            "provider '{}' requires model.base_url",
            config.provider
        ))
    })?;

    let name = match config.provider {
        ProviderKind::Openrouter => "OpenRouter",
        ProviderKind::Openai => "OpenAI",
        ProviderKind::Custom => "Custom",
    };

    tracing::info!(
        provider = config.provider.id(),
        base_url = %base_url,
        "Using API key from {var}"
    );

    Ok(Arc::new(OpenAICompatProvider::new(
        config.provider.id(),
        name,
        key,
        base_url,
    )))
}
