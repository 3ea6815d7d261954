// src/application/config.rs
//
// Runtime configuration and persisted settings
//
// RULES:
// - Settings are explicit values passed to whoever needs them
// - A missing settings file means defaults, never an error
// - Paths are resolved once, at startup

use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::db::get_database_path;
use crate::domain::DomainError;
use crate::error::{AppError, AppResult};
use crate::infrastructure::normalize_relative_path;

pub const DEFAULT_IMAGE_FOLDER: &str = "assets";

// ============================================================================
// APP CONFIG
// ============================================================================

/// Where the application keeps its data.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root directory the asset store is rooted at
    pub assets_root: PathBuf,

    /// SQLite record store
    pub database_path: PathBuf,

    /// JSON settings file
    pub settings_path: PathBuf,
}

impl AppConfig {
    /// Resolve unset paths to their platform defaults.
    pub fn resolve(
        assets_root: Option<PathBuf>,
        database_path: Option<PathBuf>,
    ) -> AppResult<Self> {
        let assets_root = match assets_root {
            Some(root) => root,
            None => std::env::current_dir()?,
        };
        let database_path = match database_path {
            Some(path) => path,
            None => get_database_path()?,
        };

        Ok(Self {
            assets_root,
            database_path,
            settings_path: default_settings_path()?,
        })
    }
}

pub fn default_settings_path() -> AppResult<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| AppError::Other("Could not determine config directory".to_string()))?;
    Ok(config_dir.join("artmatch").join("settings.json"))
}

// ============================================================================
// EXTRACT OPTIONS
// ============================================================================

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub archive_path: PathBuf,
    pub destination: String,
    pub overwrite: bool,
    pub quiet: bool,
}

impl ExtractOptions {
    pub fn new(archive_path: impl Into<PathBuf>, destination: impl Into<String>) -> Self {
        Self {
            archive_path: archive_path.into(),
            destination: destination.into(),
            overwrite: true,
            quiet: false,
        }
    }

    /// Normalized destination; an empty one is refused.
    pub fn normalized_destination(&self) -> AppResult<String> {
        let destination = normalize_relative_path(&self.destination);
        if destination.is_empty() {
            return Err(AppError::Domain(DomainError::InvariantViolation(
                "Destination folder required".to_string(),
            )));
        }
        Ok(destination)
    }
}

// ============================================================================
// SETTINGS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Folder last populated by an extraction; default source folder for matching
    pub last_image_folder: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_image_folder: DEFAULT_IMAGE_FOLDER.to_string(),
        }
    }
}

pub trait SettingsStore: Send + Sync {
    fn load(&self) -> AppResult<Settings>;
    fn save(&self, settings: &Settings) -> AppResult<()>;
}

/// Settings persisted as pretty-printed JSON.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStore for JsonSettingsStore {
    fn load(&self) -> AppResult<Settings> {
        match std::fs::read_to_string(&self.path) {
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", self.path.display());
                Ok(Settings::default())
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }

    fn save(&self, settings: &Settings) -> AppResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(settings)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_settings_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonSettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().unwrap().last_image_folder, "assets");
    }

    #[test]
    fn test_settings_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = JsonSettingsStore::new(dir.path().join("nested/settings.json"));
        let settings = Settings {
            last_image_folder: "assets/monsters".to_string(),
        };

        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_partial_settings_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{}").unwrap();
        assert_eq!(
            JsonSettingsStore::new(path).load().unwrap(),
            Settings::default()
        );
    }

    #[test]
    fn test_corrupt_settings_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonSettingsStore::new(path).load(),
            Err(AppError::Serialization(_))
        ));
    }

    #[test]
    fn test_extract_destination_is_normalized() {
        let options = ExtractOptions::new("pack.zip", " assets\\monsters/ ");
        assert_eq!(options.normalized_destination().unwrap(), "assets/monsters");
        assert!(ExtractOptions::new("pack.zip", "../..").normalized_destination().is_err());
    }
}
