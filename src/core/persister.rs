// src/core/persister.rs — Write accepted code to numbered files

use std::path::PathBuf;

use crate::infra::config::GenerationConfig;

/// Writes each accepted program to `{dir}/{prefix}{iteration}.{extension}`.
///
/// Single writer only: no locking, no atomic rename. A second save with the
/// same iteration overwrites the first.
pub struct CodePersister {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

impl CodePersister {
    pub fn new(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &GenerationConfig) -> Self {
        Self::new(
            config.output_dir.clone(),
            config.file_prefix.clone(),
            config.file_extension.clone(),
        )
    }

    pub fn path_for(&self, iteration: u32) -> PathBuf {
        let ext = self.extension.trim_start_matches('.');
        if ext.is_empty() {
            self.dir.join(format!("{}{}", self.prefix, iteration))
        } else {
            self.dir.join(format!("{}{}.{}", self.prefix, iteration, ext))
        }
    }

    /// Create the output directory if needed and write `code` verbatim.
    pub fn save(&self, code: &str, iteration: u32) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(iteration);
        std::fs::write(&path, code)?;
        tracing::debug!("Saved iteration {} to {}", iteration, path.display());
        Ok(path)
    }
}
