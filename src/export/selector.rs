//! Choosing which playlists an export run covers

use std::collections::HashSet;

use crate::library::Playlist;
use crate::settings::ExportConfig;

/// Filter the library's playlists down to those the configuration selects
///
/// Library order is kept, not the order of the id list. Selected ids with no
/// matching playlist are ignored since playlists may have been deleted after
/// the selection was saved.
pub fn select_playlists(all: Vec<Playlist>, config: &ExportConfig) -> Vec<Playlist> {
    if config.export_all_playlists {
        return all;
    }

    let wanted: HashSet<&str> = config
        .selected_playlist_ids
        .iter()
        .map(|id| id.trim())
        .collect();

    all.into_iter()
        .filter(|p| wanted.contains(p.id.trim()))
        .collect()
}
