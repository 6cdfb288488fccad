//! Config file discovery.

use pegboard::{AppConfig, ConfigError};
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "config.json";

/// Directory holding pegboard's config, `./pegboard` when the platform has none.
pub(crate) fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pegboard")
}

/// Default config file location.
pub(crate) fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE)
}

/// Load the config.
///
/// An explicit path must exist. The default path falls back to built-in
/// defaults when absent.
pub(crate) fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match explicit {
        Some(path) => AppConfig::load(path),
        None => AppConfig::load_or_default(&default_config_path()),
    }
}

/// Write the default config to `path`. Refuses to overwrite unless `force`.
pub(crate) fn init_config(path: &Path, force: bool) -> Result<AppConfig, ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::Invalid(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    let config = AppConfig::default();
    config.save(path)?;
    Ok(config)
}
