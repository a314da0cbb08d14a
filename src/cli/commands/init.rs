//! Init command - Create the .wfdesigner directory

use std::path::Path;

use crate::errors::Result;
use crate::fs;
use crate::schemas::Config;

/// Initialize a designer project in the specified directory
pub async fn run(cwd: Option<&Path>, force: bool, api_url: Option<&str>) -> Result<()> {
    let root = fs::resolve_cwd(cwd);
    let config_path = fs::get_config_path(&root);

    if config_path.exists() && !force {
        println!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
        return Ok(());
    }

    let mut config = Config::default();
    if let Some(url) = api_url {
        config.api_base_url = url.trim_end_matches('/').to_string();
    }
    fs::write_config(&root, &config)?;

    tracing::info!(path = %config_path.display(), "initialized project");
    println!("Initialized {}", fs::get_designer_dir(&root).display());
    Ok(())
}
