//! Where csvgrid keeps its files
//!
//! Everything lives in one per-user directory: the delimiter defaults in
//! `config.yaml` and the rolling log files under `logs/`. The directory
//! follows the platform convention (`$XDG_CONFIG_HOME/csvgrid`,
//! `~/.config/csvgrid`, or `%APPDATA%\csvgrid` on Windows).

use std::{env, fs, path::PathBuf};

const APP_DIR: &str = "csvgrid";
const CONFIG_FILE: &str = "config.yaml";
const LOGS_DIR: &str = "logs";

/// Per-user csvgrid directory, `None` when no home can be found
pub fn config_dir() -> Option<PathBuf> {
    platform_base().map(|base| base.join(APP_DIR))
}

#[cfg(target_os = "windows")]
fn platform_base() -> Option<PathBuf> {
    env::var_os("APPDATA").map(PathBuf::from)
}

#[cfg(not(target_os = "windows"))]
fn platform_base() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
}

/// YAML file holding [`crate::config::GridConfig`]
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Directory for the daily `csvgrid.log` files
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(LOGS_DIR))
}

/// Create the logs directory if needed and return it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    fs::create_dir_all(&logs)
        .map_err(|e| format!("Failed to create log directory {}: {}", logs.display(), e))?;
    Ok(logs)
}
