//! Media library access
//!
//! The exporter only ever reads from the library: the playlist index and the
//! ordered track paths of one playlist.

pub mod sqlite;

use anyhow::Result;

pub use sqlite::SqliteLibrary;

/// Playlist metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    /// Stable library identifier, compared as a string
    pub id: String,
    /// Display name, used for the output file name and messages
    pub name: String,
}

impl Playlist {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Read-only view of a media library
pub trait LibraryStore {
    /// All playlists, in a deterministic order
    fn list_playlists(&self) -> Result<Vec<Playlist>>;

    /// Track paths of one playlist, in playback order
    fn list_tracks_for_playlist(&self, id: &str) -> Result<Vec<String>>;
}

impl<T: LibraryStore + ?Sized> LibraryStore for &T {
    fn list_playlists(&self) -> Result<Vec<Playlist>> {
        (**self).list_playlists()
    }

    fn list_tracks_for_playlist(&self, id: &str) -> Result<Vec<String>> {
        (**self).list_tracks_for_playlist(id)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::{HashMap, HashSet};

    /// In-memory library for tests
    #[derive(Debug, Default)]
    pub struct MemoryLibrary {
        playlists: Vec<Playlist>,
        tracks: HashMap<String, Vec<String>>,
        broken: HashSet<String>,
        unavailable: bool,
    }

    impl MemoryLibrary {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_playlist(mut self, id: &str, name: &str, tracks: &[&str]) -> Self {
            self.playlists.push(Playlist::new(id, name));
            self.tracks.insert(
                id.to_string(),
                tracks.iter().map(|t| t.to_string()).collect(),
            );
            self
        }

        /// Make track lookups for `id` fail
        pub fn with_broken_playlist(mut self, id: &str, name: &str) -> Self {
            self.playlists.push(Playlist::new(id, name));
            self.broken.insert(id.to_string());
            self
        }

        /// Make the playlist index itself fail
        pub fn unavailable(mut self) -> Self {
            self.unavailable = true;
            self
        }

        pub fn set_tracks(&mut self, id: &str, tracks: &[&str]) {
            self.tracks.insert(
                id.to_string(),
                tracks.iter().map(|t| t.to_string()).collect(),
            );
        }
    }

    impl LibraryStore for MemoryLibrary {
        fn list_playlists(&self) -> Result<Vec<Playlist>> {
            if self.unavailable {
                anyhow::bail!("library database is locked");
            }
            Ok(self.playlists.clone())
        }

        fn list_tracks_for_playlist(&self, id: &str) -> Result<Vec<String>> {
            if self.broken.contains(id) {
                anyhow::bail!("no such table: PlaylistSongs");
            }
            Ok(self.tracks.get(id).cloned().unwrap_or_default())
        }
    }
}
