//! Configuration file persistence for the PDI editor
//!
//! Loads and saves JSON files in the platform-specific config directory:
//! the settings file and the cached backend session. Writes are atomic
//! (backup file then rename) and loading falls back to defaults.

use crate::config::Settings;
use crate::error::{Error, Result, ResultExt};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Application name used for the config directory
const APP_NAME: &str = "pdi-editor";

/// Configuration file name
const CONFIG_FILE_NAME: &str = "config.json";

/// Suffix of the temporary file used during atomic writes
const BACKUP_SUFFIX: &str = ".bak";

// ─────────────────────────────────────────────────────────────────────────────
// Platform-Specific Directory Resolution
// ─────────────────────────────────────────────────────────────────────────────

/// Get the platform-specific configuration directory for the application.
///
/// - **Windows**: `%APPDATA%\pdi-editor\`
/// - **macOS**: `~/Library/Application Support/pdi-editor/`
/// - **Linux**: `~/.config/pdi-editor/`
///
/// # Errors
///
/// Returns `Error::ConfigDirNotFound` if the config directory cannot be determined.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|base| base.join(APP_NAME))
        .ok_or(Error::ConfigDirNotFound)
}

/// Ensure a directory exists, creating it if necessary.
fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        debug!("Creating config directory: {}", dir.display());
        fs::create_dir_all(dir).map_err(|e| Error::ConfigSave {
            path: dir.to_path_buf(),
            source: Box::new(e),
        })?;
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Generic JSON Files
// ─────────────────────────────────────────────────────────────────────────────

/// Read `name` from `dir` and deserialize it.
///
/// Returns `Ok(None)` when the file is missing or empty.
pub fn load_json_from<T: DeserializeOwned>(dir: &Path, name: &str) -> Result<Option<T>> {
    let path = dir.join(name);

    if !path.exists() {
        debug!("{} not found, nothing to load", path.display());
        return Ok(None);
    }

    let contents = fs::read_to_string(&path).map_err(|e| Error::ConfigLoad {
        path: path.clone(),
        source: Box::new(e),
    })?;

    if contents.trim().is_empty() {
        debug!("{} is empty", path.display());
        return Ok(None);
    }

    let value = serde_json::from_str(&contents).map_err(|e| {
        warn!("{} contains invalid JSON: {}", path.display(), e);
        Error::ConfigParse {
            message: format!("Failed to parse {}: {}", name, e),
            source: Some(Box::new(e)),
        }
    })?;

    Ok(Some(value))
}

/// Serialize `value` to pretty JSON and write it atomically to `dir/name`.
pub fn save_json_to<T: Serialize>(dir: &Path, name: &str, value: &T) -> Result<()> {
    ensure_dir(dir)?;
    let path = dir.join(name);
    let backup_path = dir.join(format!("{}{}", name, BACKUP_SUFFIX));

    let json = serde_json::to_string_pretty(value).map_err(|e| Error::ConfigSave {
        path: path.clone(),
        source: Box::new(e),
    })?;

    fs::write(&backup_path, &json).map_err(|e| Error::ConfigSave {
        path: backup_path.clone(),
        source: Box::new(e),
    })?;

    fs::rename(&backup_path, &path).map_err(|e| Error::ConfigSave {
        path: path.clone(),
        source: Box::new(e),
    })?;

    debug!("Wrote {}", path.display());
    Ok(())
}

/// Delete `dir/name` if it exists.
pub fn remove_file_in(dir: &Path, name: &str) -> Result<()> {
    let path = dir.join(name);
    if path.exists() {
        fs::remove_file(&path)?;
        debug!("Removed {}", path.display());
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// Settings
// ─────────────────────────────────────────────────────────────────────────────

/// Load configuration from the default config file location.
///
/// Missing, empty or corrupted files yield default settings; corruption is
/// logged as a warning.
pub fn load_config() -> Settings {
    load_config_internal()
        .unwrap_or_warn_default(Settings::default(), "Failed to load configuration")
}

fn load_config_internal() -> Result<Settings> {
    let dir = get_config_dir()?;
    load_config_from(&dir)
}

/// Load and sanitize settings stored in `dir`.
pub fn load_config_from(dir: &Path) -> Result<Settings> {
    let settings = match load_json_from::<Settings>(dir, CONFIG_FILE_NAME)? {
        Some(mut settings) => {
            settings.sanitize();
            info!("Configuration loaded from {}", dir.display());
            settings
        }
        None => Settings::default(),
    };
    Ok(settings)
}

/// Save configuration to the default config file location.
///
/// # Errors
///
/// - `Error::ConfigDirNotFound`: Config directory cannot be determined
/// - `Error::ConfigSave`: Failed to write the config file
pub fn save_config(settings: &Settings) -> Result<()> {
    let dir = get_config_dir()?;
    save_json_to(&dir, CONFIG_FILE_NAME, settings)?;
    info!("Configuration saved to {}", dir.display());
    Ok(())
}

/// Save configuration, logging instead of failing.
///
/// Returns `true` if the save was successful.
pub fn save_config_silent(settings: &Settings) -> bool {
    match save_config(settings) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to save configuration: {}", e);
            false
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
