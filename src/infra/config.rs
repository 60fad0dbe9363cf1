// src/infra/config.rs — Configuration loading (TOML)
//
// Layering: preset defaults < config file < CLI flags. The file is merged
// table-by-table onto the serialized preset, so a file only needs the keys
// it wants to change.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::infra::errors::AutoCoderError;
use crate::infra::paths;

pub const DEFAULT_PROMPT: &str = "create a beautiful tower defense game in pygame. do not use outside assets. all assets should be created within pygame";

pub const OPENROUTER_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub execution: ExecutionConfig,

    #[serde(default)]
    pub fix: FixConfig,
}

/// Built-in starting points for the two supported workflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Generate, run, fix once, save on success (OpenRouter, deepseek-r1)
    #[default]
    Executor,
    /// Generate and save without running anything (OpenAI, o1)
    GenerateOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Openrouter,
    Openai,
    /// Any OpenAI-compatible endpoint; requires `base_url`.
    Custom,
}

impl ProviderKind {
    pub fn id(&self) -> &'static str {
        match self {
            ProviderKind::Openrouter => "openrouter",
            ProviderKind::Openai => "openai",
            ProviderKind::Custom => "custom",
        }
    }

    pub fn default_base_url(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Openrouter => Some(OPENROUTER_BASE_URL),
            ProviderKind::Openai => Some(OPENAI_BASE_URL),
            ProviderKind::Custom => None,
        }
    }

    /// Model used when the provider is chosen without naming one.
    pub fn default_model(&self) -> Option<&'static str> {
        match self {
            ProviderKind::Openrouter => Some("deepseek/deepseek-r1"),
            ProviderKind::Openai => Some("o1"),
            ProviderKind::Custom => None,
        }
    }

    pub fn default_api_key_env(&self) -> &'static str {
        match self {
            ProviderKind::Openrouter => "OPENROUTER_API_KEY",
            ProviderKind::Openai => "OPENAI_API_KEY",
            ProviderKind::Custom => "AUTOCODER_API_KEY",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub provider: ProviderKind,
    pub model: String,
    /// Overrides the provider's default endpoint.
    pub base_url: Option<String>,
    /// Overrides the provider's default API key variable.
    pub api_key_env: Option<String>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Openrouter,
            model: "deepseek/deepseek-r1".into(),
            base_url: None,
            api_key_env: None,
        }
    }
}

impl ModelConfig {
    /// Switch to `provider`, taking its default model along. A custom
    /// endpoint has no default, so the current model is kept.
    pub fn set_provider(&mut self, provider: ProviderKind) {
        if provider == self.provider {
            return;
        }
        if let Some(model) = provider.default_model() {
            self.model = model.into();
        }
        self.provider = provider;
    }

    pub fn resolved_base_url(&self) -> Option<String> {
        self.base_url
            .clone()
            .or_else(|| self.provider.default_base_url().map(String::from))
            .map(|u| u.trim_end_matches('/').to_string())
    }

    pub fn resolved_api_key_env(&self) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| self.provider.default_api_key_env().to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub prompt: String,
    pub iterations: u32,
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub file_extension: String,
    /// Pause after each saved iteration (crude outbound rate limit).
    pub iteration_delay_ms: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.into(),
            iterations: 20,
            output_dir: PathBuf::from("generated_code"),
            file_prefix: "generated_code_v".into(),
            file_extension: "py".into(),
            iteration_delay_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionConfig {
    pub enabled: bool,
    pub interpreter: String,
    pub timeout_seconds: u64,
    /// A program still running at the deadline counts as working (GUI loops, servers).
    pub treat_timeout_as_success: bool,
    /// Where temp scripts are written; the system temp dir when unset.
    pub script_dir: Option<PathBuf>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interpreter: "python3".into(),
            timeout_seconds: 5,
            treat_timeout_as_success: true,
            script_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixConfig {
    pub enabled: bool,
    /// Characters of stderr (most recent kept) sent to the model.
    pub max_error_length: usize,
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_error_length: 500,
        }
    }
}

impl Config {
    pub fn preset(preset: Preset) -> Self {
        match preset {
            Preset::Executor => Self::default(),
            Preset::GenerateOnly => Self {
                model: {
                    let mut model = ModelConfig::default();
                    model.set_provider(ProviderKind::Openai);
                    model
                },
                generation: GenerationConfig {
                    iterations: 3,
                    ..GenerationConfig::default()
                },
                execution: ExecutionConfig {
                    enabled: false,
                    ..ExecutionConfig::default()
                },
                fix: FixConfig {
                    enabled: false,
                    ..FixConfig::default()
                },
            },
        }
    }

    /// Load config from the first existing search path, falling back to the preset.
    pub fn load(preset: Preset) -> anyhow::Result<Self> {
        for path in paths::config_search_paths() {
            if path.exists() {
                tracing::debug!("Loading config from {}", path.display());
                return Self::load_from(&path, preset);
            }
        }
        Ok(Self::preset(preset))
    }

    pub fn load_from(path: &Path, preset: Preset) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, preset)
    }

    /// Parse `content` on top of the preset's values.
    pub fn from_toml_str(content: &str, preset: Preset) -> anyhow::Result<Self> {
        let mut overlay: toml::Table = toml::from_str(content)?;
        // A provider given without a model brings its own default model.
        let bare_provider = match overlay.get_mut("model") {
            Some(toml::Value::Table(m)) if !m.contains_key("model") => m.remove("provider"),
            _ => None,
        };
        let toml::Value::Table(mut base) = toml::Value::try_from(Self::preset(preset))? else {
            anyhow::bail!("preset did not serialize to a table");
        };
        merge_tables(&mut base, overlay);
        let mut config: Config = toml::Value::Table(base).try_into()?;
        if let Some(provider) = bare_provider {
            config.model.set_provider(provider.try_into()?);
        }
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AutoCoderError> {
        if self.generation.prompt.trim().is_empty() {
            return Err(AutoCoderError::Config("prompt must not be empty".into()));
        }
        if self.generation.iterations == 0 {
            return Err(AutoCoderError::Config(
                "iterations must be at least 1".into(),
            ));
        }
        if self.execution.enabled && self.execution.timeout_seconds == 0 {
            return Err(AutoCoderError::Config(
                "execution.timeout_seconds must be at least 1".into(),
            ));
        }
        if self.model.resolved_base_url().is_none() {
            return Err(AutoCoderError::Config(format!(
                "provider '{}' requires model.base_url",
                self.model.provider
            )));
        }
        Ok(())
    }
}

/// Recursively merge `overlay` into `base`; overlay scalars replace base values.
fn merge_tables(base: &mut toml::Table, overlay: toml::Table) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(toml::Value::Table(b)), toml::Value::Table(o)) => merge_tables(b, o),
            (_, v) => {
                base.insert(key, v);
            }
        }
    }
}
