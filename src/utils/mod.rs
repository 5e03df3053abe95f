//! Utility functions

mod m3u;
mod sanitize;

pub use m3u::{generate_m3u, normalize_separators};
pub use sanitize::playlist_filename;
