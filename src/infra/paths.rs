// src/infra/paths.rs — Config file discovery
//
// AUTOCODER_HOME overrides the per-user directory. When unset, user config
// lives in ~/.autocoder/. A project-local ./autocoder.toml wins over both.

use std::path::PathBuf;

/// Project-local config file name, looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "autocoder.toml";

/// Returns the AUTOCODER_HOME override, if set.
fn autocoder_home() -> Option<PathBuf> {
    std::env::var_os("AUTOCODER_HOME").map(PathBuf::from)
}

/// Home directory, or the working directory when none can be determined.
pub fn dirs_home() -> PathBuf {
    directories::BaseDirs::new()
        .map(|d| d.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Configuration directory: $AUTOCODER_HOME/ or ~/.autocoder/
pub fn config_dir() -> PathBuf {
    if let Some(home) = autocoder_home() {
        return home;
    }
    dirs_home().join(".autocoder")
}

/// User-level config file path
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Candidate config files in priority order.
pub fn config_search_paths() -> Vec<PathBuf> {
    vec![PathBuf::from(LOCAL_CONFIG_FILE), config_file_path()]
}
