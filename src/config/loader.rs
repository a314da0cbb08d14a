//! Configuration loading with defaults

use std::path::Path;

use crate::errors::{DesignerError, Result};
use crate::fs;
use crate::schemas::Config;

/// Load configuration from the project, falling back to defaults.
///
/// If config.json exists, it will be read and merged with defaults.
/// If it doesn't exist, default configuration is returned.
pub fn load_config(root: &Path) -> Result<Config> {
    let config = fs::read_config(root)?;
    if config.api_base_url.trim().is_empty() {
        return Err(DesignerError::ConfigError("api_base_url is empty".to_string()));
    }
    Ok(config)
}
