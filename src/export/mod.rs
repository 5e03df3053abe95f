//! Playlist export to M3U files

pub mod coordinator;
pub mod error;
pub mod fs;
pub mod result;
pub mod selector;
pub mod serializer;

pub use coordinator::{ExportCoordinator, ExportProgress};
pub use error::{ExportError, PlaylistError};
pub use fs::{DryRunFs, ExportFs, LocalFs};
pub use result::{BatchResult, ExportFailure, ExportOutcome};
pub use selector::select_playlists;
pub use serializer::serialize_playlist;
