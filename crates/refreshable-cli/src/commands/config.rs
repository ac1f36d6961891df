use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use refreshable_core::AppConfig;

pub fn show(config: &AppConfig, path: Option<&Path>) -> Result<()> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(AppConfig::config_path);
    let source = if path.exists() { "" } else { " (not found, using defaults)" };

    println!("# {}{}", path.display(), source);
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Write the default configuration to `path`, or to the default location
pub fn init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let target = path.clone().unwrap_or_else(AppConfig::config_path);
    if target.exists() && !force {
        bail!(
            "Config file already exists: {}\nUse --force to overwrite it.",
            target.display()
        );
    }

    let defaults = AppConfig::default();
    let written = match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, defaults.to_toml()?)?;
            path
        }
        None => defaults.save()?,
    };

    println!("Wrote default configuration to {}", written.display());
    Ok(())
}
