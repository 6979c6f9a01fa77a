//! XDG-style path resolution for the configuration directory.
//!
//! XDG conventions are preferred over OS-specific locations, so macOS
//! users also get `~/.config/deepyami`.

use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR: &str = "deepyami";

/// Returns the configuration directory for deepyami.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/deepyami` if `XDG_CONFIG_HOME` is set and non-empty
/// 2. `~/.config/deepyami` otherwise
pub fn config_dir() -> Result<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Ok(PathBuf::from(xdg).join(APP_DIR));
    }

    let home = dirs::home_dir().context("Failed to determine home directory")?;
    Ok(home.join(".config").join(APP_DIR))
}

/// Returns the path of `config.toml`.
pub fn config_file() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}
