//! SQLite-backed library store
//!
//! Reads the media library database layout used by MediaMonkey:
//! `Playlists(IDPlaylist, PlaylistName)`, `PlaylistSongs(IDPlaylist, IDSong,
//! SongOrder)` and `Songs(ID, SongPath)`.

use anyhow::{Context, Result};
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;
use tracing::debug;

use super::{LibraryStore, Playlist};

const PLAYLISTS_QUERY: &str = "SELECT IDPlaylist, PlaylistName FROM Playlists \
     WHERE PlaylistName IS NOT NULL AND PlaylistName != '' \
     ORDER BY PlaylistName";

const TRACKS_QUERY: &str = "SELECT Songs.SongPath FROM PlaylistSongs \
     INNER JOIN Songs ON PlaylistSongs.IDSong = Songs.ID \
     WHERE PlaylistSongs.IDPlaylist = ?1 \
     ORDER BY PlaylistSongs.SongOrder";

/// Library store over a media library database
pub struct SqliteLibrary {
    conn: Connection,
}

impl SqliteLibrary {
    /// Open a library database read-only
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open library database {}", db_path.display()))?;

        debug!("Opened library database: {}", db_path.display());
        Ok(Self { conn })
    }

    /// Wrap an existing connection
    #[cfg(test)]
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    /// Number of tracks in a playlist
    pub fn track_count(&self, id: &str) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM PlaylistSongs WHERE IDPlaylist = ?1",
                params![id],
                |row| row.get(0),
            )
            .context("Failed to count playlist tracks")?;
        Ok(count.max(0) as usize)
    }
}

impl LibraryStore for SqliteLibrary {
    fn list_playlists(&self) -> Result<Vec<Playlist>> {
        let mut stmt = self
            .conn
            .prepare(PLAYLISTS_QUERY)
            .context("Failed to prepare playlist query")?;

        let playlists = stmt
            .query_map([], |row| {
                // IDPlaylist is an INTEGER column but ids are handled as strings
                let id: rusqlite::types::Value = row.get(0)?;
                let name: String = row.get(1)?;
                Ok(Playlist::new(value_to_id(id), name))
            })
            .context("Failed to query playlists")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read playlist row")?;

        debug!("Loaded {} playlists from library", playlists.len());
        Ok(playlists)
    }

    fn list_tracks_for_playlist(&self, id: &str) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(TRACKS_QUERY)
            .context("Failed to prepare track query")?;

        let tracks = stmt
            .query_map(params![id], |row| row.get::<_, String>(0))
            .with_context(|| format!("Failed to query tracks for playlist {}", id))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read track row")?;

        debug!("Loaded {} tracks for playlist {}", tracks.len(), id);
        Ok(tracks)
    }
}

fn value_to_id(value: rusqlite::types::Value) -> String {
    use rusqlite::types::Value;

    match value {
        Value::Integer(i) => i.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => String::from_utf8_lossy(&b).into_owned(),
        Value::Null => String::new(),
    }
}
