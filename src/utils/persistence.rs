//! Data directory resolution and JSON helpers.
//!
//! Everything the game writes (high score, config, log) lives in one
//! directory: the platform data dir from `directories`, or `$CIRECH_DATA_DIR`
//! when set.

use crate::core::config::GameConfig;
use crate::core::constants::{CONFIG_FILE, DATA_DIR_ENV};
use crate::error::{CirechError, Result};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Get the data directory, creating it if needed.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) => PathBuf::from(dir),
        None => ProjectDirs::from("eu", "lucci", "cirech")
            .ok_or(CirechError::NoDataDir)?
            .data_dir()
            .to_path_buf(),
    };
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Load a JSON file, returning `T::default()` if it is missing or invalid.
pub fn load_json_or_default<T: Default + DeserializeOwned>(path: &Path) -> T {
    match load_json(path) {
        Ok(value) => value,
        Err(CirechError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => T::default(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable JSON file");
            T::default()
        }
    }
}

/// Load and parse a JSON file.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

/// Save a value as pretty-printed JSON.
pub fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load `config.json` from `dir`, writing the defaults there on first run so
/// the file exists for players to edit.
pub fn load_config(dir: &Path) -> GameConfig {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        let config = GameConfig::default();
        if let Err(e) = save_json(&path, &config) {
            warn!(path = %path.display(), error = %e, "Could not write default config");
        }
        return config;
    }
    load_json_or_default::<GameConfig>(&path).sanitized()
}
