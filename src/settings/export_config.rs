//! Typed export configuration
//!
//! Resolved once from the settings store; every field has an explicit default.

use anyhow::Result;
use std::collections::BTreeSet;
use std::path::PathBuf;
use tracing::debug;

use super::SettingsStore;
use crate::export::ExportError;

pub const KEY_EXPORT_PATH: &str = "exportPath";
pub const KEY_EXPORT_ALL: &str = "exportAllPlaylists";
pub const KEY_USE_FORWARD_SLASH: &str = "useForwardSlash";
pub const KEY_SELECTED_PLAYLISTS: &str = "exportSelectedPlaylists";
pub const KEY_LIBRARY_PATH: &str = "libraryPath";

/// Export configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Export every playlist, ignoring `selected_playlist_ids`
    pub export_all_playlists: bool,
    /// Playlist ids to export when `export_all_playlists` is false
    pub selected_playlist_ids: BTreeSet<String>,
    /// Directory the `.m3u` files are written to
    pub export_path: PathBuf,
    /// Write `/` separators in track paths (otherwise `\`)
    pub use_forward_slash: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            export_all_playlists: true,
            selected_playlist_ids: BTreeSet::new(),
            export_path: PathBuf::new(),
            use_forward_slash: true,
        }
    }
}

impl ExportConfig {
    /// Resolve the configuration from persisted settings
    pub fn load<S: SettingsStore>(store: &S) -> Self {
        let defaults = Self::default();

        let export_path: String = store.get_setting(KEY_EXPORT_PATH, String::new());
        let selected: String = store.get_setting(KEY_SELECTED_PLAYLISTS, String::new());

        let config = Self {
            export_all_playlists: store.get_setting(KEY_EXPORT_ALL, defaults.export_all_playlists),
            selected_playlist_ids: parse_id_list(&selected),
            export_path: PathBuf::from(export_path),
            use_forward_slash: store
                .get_setting(KEY_USE_FORWARD_SLASH, defaults.use_forward_slash),
        };

        debug!("Loaded export config: {:?}", config);
        config
    }

    /// Persist the configuration
    ///
    /// The selected ids are only kept when not exporting everything.
    pub fn save<S: SettingsStore>(&self, store: &mut S) -> Result<()> {
        let selected = if self.export_all_playlists {
            String::new()
        } else {
            join_id_list(&self.selected_playlist_ids)
        };

        store.set_setting(KEY_EXPORT_PATH, self.export_path.to_string_lossy())?;
        store.set_setting(KEY_EXPORT_ALL, self.export_all_playlists)?;
        store.set_setting(KEY_USE_FORWARD_SLASH, self.use_forward_slash)?;
        store.set_setting(KEY_SELECTED_PLAYLISTS, selected)?;
        Ok(())
    }

    /// Check the configuration is complete enough to save
    ///
    /// A missing export directory is not an error here; it is checked again
    /// when an export runs.
    pub fn validate(&self) -> Result<(), ExportError> {
        if self.export_path.as_os_str().is_empty() {
            return Err(ExportError::NoExportPath);
        }
        if !self.export_all_playlists && self.selected_playlist_ids.is_empty() {
            return Err(ExportError::NothingSelected);
        }
        Ok(())
    }

    /// Whether a playlist id is selected by this configuration
    pub fn is_selected(&self, id: &str) -> bool {
        self.export_all_playlists || self.selected_playlist_ids.contains(id.trim())
    }
}

/// Parse a comma-separated id list, trimming entries and dropping blanks
pub fn parse_id_list(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn join_id_list(ids: &BTreeSet<String>) -> String {
    ids.iter().map(String::as_str).collect::<Vec<_>>().join(",")
}
