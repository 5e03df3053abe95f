//! Turning one playlist into M3U text and a file name

use crate::export::PlaylistError;
use crate::library::Playlist;
use crate::utils::{generate_m3u, normalize_separators, playlist_filename};

/// A playlist ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializedPlaylist {
    /// M3U file content
    pub content: String,
    /// Output file name, including the `.m3u` extension
    pub filename: String,
}

/// Serialize a playlist's tracks to M3U
///
/// An empty playlist is an error rather than a header-only file, since it
/// usually means the playlist reference upstream is stale. No I/O happens
/// here.
pub fn serialize_playlist(
    playlist: &Playlist,
    tracks: &[String],
    use_forward_slash: bool,
) -> Result<SerializedPlaylist, PlaylistError> {
    if tracks.is_empty() {
        return Err(PlaylistError::EmptyPlaylist);
    }

    let entries: Vec<String> = tracks
        .iter()
        .map(|track| normalize_separators(track, use_forward_slash))
        .collect();

    Ok(SerializedPlaylist {
        content: generate_m3u(&entries),
        filename: playlist_filename(&playlist.name, &playlist.id),
    })
}
