use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn spendlens_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".spendlens"))
}

/// `~/.spendlens/config.toml`; created by `init-config`.
pub fn default_config_path() -> Result<PathBuf> {
    Ok(spendlens_home()?.join("config.toml"))
}
