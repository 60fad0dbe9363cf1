// src/core/mod.rs — Code generation pipeline

pub mod extractor;
pub mod fixer;
pub mod orchestrator;
pub mod persister;
pub mod prompts;
pub mod sandbox;
pub mod types;
