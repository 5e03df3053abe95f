//! Export run orchestration

use std::path::PathBuf;
use tracing::{debug, info, warn};

use super::{
    select_playlists, serialize_playlist, BatchResult, ExportError, ExportFailure, ExportFs,
    ExportOutcome, PlaylistError,
};
use crate::library::{LibraryStore, Playlist};
use crate::settings::ExportConfig;

/// Progress updates sent during an export run
#[derive(Debug, Clone)]
pub enum ExportProgress {
    /// Preconditions passed; `total` playlists will be processed
    Started { total: usize },
    /// A playlist file was written
    PlaylistExported { name: String, path: PathBuf },
    /// A playlist failed; the run continues
    PlaylistFailed { name: String, reason: String },
}

/// Drives an export run over a library and a filesystem
pub struct ExportCoordinator<L, F> {
    library: L,
    fs: F,
}

impl<L: LibraryStore, F: ExportFs> ExportCoordinator<L, F> {
    pub fn new(library: L, fs: F) -> Self {
        Self { library, fs }
    }

    /// Export every selected playlist
    pub fn run(&self, config: &ExportConfig) -> Result<BatchResult, ExportError> {
        self.run_with_progress(config, |_| {})
    }

    /// Export every selected playlist, reporting each step to `on_progress`
    ///
    /// Configuration problems abort before anything is written. After that,
    /// playlists are processed in selection order and each failure is
    /// recorded in the result instead of stopping the run.
    pub fn run_with_progress(
        &self,
        config: &ExportConfig,
        mut on_progress: impl FnMut(ExportProgress),
    ) -> Result<BatchResult, ExportError> {
        let selected = self
            .prepare(config)
            .inspect_err(|e| warn!("Export aborted: {}", e))?;

        info!(
            "Exporting {} playlist(s) to {}",
            selected.len(),
            config.export_path.display()
        );
        on_progress(ExportProgress::Started {
            total: selected.len(),
        });

        let mut result = BatchResult::new();
        for playlist in &selected {
            let outcome = match self.export_playlist(playlist, config) {
                Ok(file_path) => {
                    info!("Exported playlist {} to {}", playlist.name, file_path.display());
                    on_progress(ExportProgress::PlaylistExported {
                        name: playlist.name.clone(),
                        path: file_path.clone(),
                    });
                    ExportOutcome::Success { file_path }
                }
                Err(e) => {
                    warn!("Failed to export playlist {}: {}", playlist.name, e);
                    on_progress(ExportProgress::PlaylistFailed {
                        name: playlist.name.clone(),
                        reason: e.to_string(),
                    });
                    ExportOutcome::Failure(ExportFailure {
                        playlist_name: playlist.name.clone(),
                        reason: e.to_string(),
                    })
                }
            };
            result.record(outcome);
        }

        info!(
            "Export finished: {} exported, {} failed",
            result.success_count,
            result.failure_count()
        );
        Ok(result)
    }

    /// Check preconditions and resolve the playlists to export
    fn prepare(&self, config: &ExportConfig) -> Result<Vec<Playlist>, ExportError> {
        if config.export_path.as_os_str().is_empty() {
            return Err(ExportError::NoExportPath);
        }

        if !self.fs.folder_exists(&config.export_path) {
            return Err(ExportError::ExportPathMissing(config.export_path.clone()));
        }

        let all = self
            .library
            .list_playlists()
            .map_err(|e| ExportError::Library(format!("{:#}", e)))?;

        if all.is_empty() {
            return Err(ExportError::NoPlaylists);
        }

        let available = all.len();
        let selected = select_playlists(all, config);
        debug!("Selected {} of {} playlists", selected.len(), available);

        if selected.is_empty() {
            return Err(ExportError::NothingSelected);
        }

        Ok(selected)
    }

    /// Fetch, serialize and write one playlist
    fn export_playlist(
        &self,
        playlist: &Playlist,
        config: &ExportConfig,
    ) -> Result<PathBuf, PlaylistError> {
        let tracks = self
            .library
            .list_tracks_for_playlist(&playlist.id)
            .map_err(|e| PlaylistError::Library(format!("{:#}", e)))?;

        let serialized = serialize_playlist(playlist, &tracks, config.use_forward_slash)?;
        let file_path = config.export_path.join(&serialized.filename);

        self.fs
            .write_text_file(&file_path, &serialized.content)
            .map_err(|source| PlaylistError::Io {
                path: file_path.clone(),
                source,
            })?;

        debug!("Wrote {} ({} tracks)", file_path.display(), tracks.len());
        Ok(file_path)
    }
}
