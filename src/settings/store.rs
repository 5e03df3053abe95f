//! Key-value settings store
//!
//! Settings live in ~/.config/plexport/settings.json as one flat JSON object,
//! keyed by the same names the MediaMonkey add-on used.

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Key-value settings capability
pub trait SettingsStore {
    /// Read a setting, returning `default` when it is absent or unreadable
    fn get_setting<T: DeserializeOwned>(&self, key: &str, default: T) -> T;

    /// Store a setting
    fn set_setting<T: Serialize>(&mut self, key: &str, value: T) -> Result<()>;
}

/// Settings store backed by a JSON file
#[derive(Debug, Clone, Default)]
pub struct JsonSettingsStore {
    /// Backing file; `None` keeps settings in memory only
    path: Option<PathBuf>,
    values: Map<String, Value>,
}

impl JsonSettingsStore {
    /// Load the store from the default location
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path()?)
    }

    /// Load the store from a file, starting empty if it does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No settings found at {}, using defaults", path.display());
            return Ok(Self {
                path: Some(path.to_path_buf()),
                values: Map::new(),
            });
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {:?}", path))?;

        let values: Map<String, Value> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings file {:?}", path))?;

        debug!("Loaded {} settings from {}", values.len(), path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            values,
        })
    }

    /// Create a store that is never written to disk
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Get the settings file path
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(config_dir.join("plexport").join("settings.json"))
    }

    /// Location of the backing file, if any
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn save(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(&self.values).context("Failed to serialize settings")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {:?}", path))?;

        debug!("Saved {} settings to {}", self.values.len(), path.display());
        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn get_setting<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let Some(value) = self.values.get(key) else {
            return default;
        };

        match serde_json::from_value(value.clone()) {
            Ok(v) => v,
            Err(e) => {
                warn!("Ignoring unreadable setting '{}': {}", key, e);
                default
            }
        }
    }

    fn set_setting<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value)
            .with_context(|| format!("Failed to serialize setting '{}'", key))?;
        self.values.insert(key.to_string(), value);
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_setting_returns_default() {
        let store = JsonSettingsStore::in_memory();
        assert_eq!(store.get_setting("exportPath", String::from("x")), "x");
        assert!(store.get_setting("exportAllPlaylists", true));
    }

    #[test]
    fn test_set_then_get() {
        let mut store = JsonSettingsStore::in_memory();
        store.set_setting("useForwardSlash", false).unwrap();
        assert!(!store.get_setting("useForwardSlash", true));
    }

    #[test]
    fn test_wrong_type_falls_back_to_default() {
        let mut store = JsonSettingsStore::in_memory();
        store.set_setting("exportAllPlaylists", "yes").unwrap();
        assert!(store.get_setting("exportAllPlaylists", true));
        assert!(!store.get_setting("exportAllPlaylists", false));
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        let mut store = JsonSettingsStore::load(&path).unwrap();
        store.set_setting("exportPath", "/mnt/player").unwrap();
        assert!(path.exists());

        let reloaded = JsonSettingsStore::load(&path).unwrap();
        assert_eq!(
            reloaded.get_setting("exportPath", String::new()),
            "/mnt/player"
        );
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "not json").unwrap();

        assert!(JsonSettingsStore::load(&path).is_err());
    }
}
