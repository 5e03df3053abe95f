//! Export error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop an export run before anything is written
#[derive(Error, Debug)]
pub enum ExportError {
    /// No export directory has been configured
    #[error("Export path is not configured. Run 'plexport configure' first.")]
    NoExportPath,

    /// The configured export directory does not exist
    #[error("Export path does not exist: {}", .0.display())]
    ExportPathMissing(PathBuf),

    /// The library has no playlists at all
    #[error("No playlists found in the library")]
    NoPlaylists,

    /// None of the configured playlists are available
    #[error("No playlists selected for export")]
    NothingSelected,

    /// The playlist index could not be read
    #[error("Failed to read playlists from the library: {0}")]
    Library(String),
}

impl ExportError {
    /// Whether the user can fix this by changing the configuration
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::Library(_))
    }
}

/// Errors that fail a single playlist; the batch carries on
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// The playlist has no tracks
    #[error("no tracks")]
    EmptyPlaylist,

    /// The playlist file could not be written
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The track list could not be read
    #[error("failed to read tracks: {0}")]
    Library(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_classification() {
        assert!(ExportError::NoExportPath.is_configuration());
        assert!(ExportError::ExportPathMissing(PathBuf::from("/x")).is_configuration());
        assert!(ExportError::NoPlaylists.is_configuration());
        assert!(ExportError::NothingSelected.is_configuration());
        assert!(!ExportError::Library("locked".into()).is_configuration());
    }

    #[test]
    fn test_empty_playlist_reason() {
        assert_eq!(PlaylistError::EmptyPlaylist.to_string(), "no tracks");
    }

    #[test]
    fn test_io_reason_names_path() {
        let err = PlaylistError::Io {
            path: PathBuf::from("/out/Rock.m3u"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write /out/Rock.m3u: denied");
    }
}
