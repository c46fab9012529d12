//! CLI subcommands.

pub mod batch;
pub mod config;
pub mod input;
pub mod output;
pub mod process;

use std::path::{Path, PathBuf};

use loandoc_core::models::config::LoanDocConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("loandoc")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<LoanDocConfig> {
    if let Some(path) = config_path {
        return Ok(LoanDocConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using configuration from {}", default_path.display());
        Ok(LoanDocConfig::from_file(&default_path)?)
    } else {
        Ok(LoanDocConfig::default())
    }
}
