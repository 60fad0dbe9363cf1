// src/cli/mod.rs — CLI definition (clap derive)

pub mod progress;
pub mod run;

use clap::Parser;
use std::path::PathBuf;

use crate::infra::config::{Config, Preset, ProviderKind};

#[derive(Parser, Debug)]
#[command(
    name = "autocoder",
    about = "Generate a program with an LLM, run it, fix it, and keep improving it",
    version
)]
pub struct Cli {
    /// What to build (overrides generation.prompt from config)
    #[arg(trailing_var_arg = true)]
    pub prompt: Vec<String>,

    /// Starting defaults before config file and flags are applied
    #[arg(long, value_enum, default_value = "executor")]
    pub preset: Preset,

    /// Number of generate/improve iterations
    #[arg(short = 'n', long)]
    pub iterations: Option<u32>,

    /// Model identifier sent to the provider
    #[arg(short, long)]
    pub model: Option<String>,

    /// Provider endpoint family
    #[arg(long, value_enum)]
    pub provider: Option<ProviderKind>,

    /// Base URL of an OpenAI-compatible endpoint
    #[arg(long)]
    pub base_url: Option<String>,

    /// Directory for generated_code_v{N} files
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Seconds a generated program may run before it is stopped
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Interpreter used to run generated programs
    #[arg(long)]
    pub interpreter: Option<String>,

    /// Save generated code without running it
    #[arg(long)]
    pub no_exec: bool,

    /// Skip the error-fix attempt when a program fails
    #[arg(long)]
    pub no_fix: bool,

    /// Count a program that hits the timeout as failed instead of working
    #[arg(long)]
    pub timeout_is_failure: bool,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load the config this invocation asks for and apply flag overrides.
    pub fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load_from(path, self.preset)?,
            None => Config::load(self.preset)?,
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut Config) {
        if !self.prompt.is_empty() {
            config.generation.prompt = self.prompt.join(" ");
        }
        if let Some(n) = self.iterations {
            config.generation.iterations = n;
        }
        if let Some(provider) = self.provider {
            config.model.set_provider(provider);
        }
        if let Some(ref model) = self.model {
            config.model.model = model.clone();
        }
        if let Some(ref url) = self.base_url {
            config.model.base_url = Some(url.clone());
        }
        if let Some(ref dir) = self.output_dir {
            config.generation.output_dir = dir.clone();
        }
        if let Some(t) = self.timeout {
            config.execution.timeout_seconds = t;
        }
        if let Some(ref interp) = self.interpreter {
            config.execution.interpreter = interp.clone();
        }
        if self.no_exec {
            config.execution.enabled = false;
        }
        if self.no_fix {
            config.fix.enabled = false;
        }
        if self.timeout_is_failure {
            config.execution.treat_timeout_as_success = false;
        }
    }
}
