//! Filename sanitization utilities

/// Characters that cannot appear in a file name on FAT/NTFS volumes
const FORBIDDEN_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Device names Windows refuses to open as plain files
const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

const PLAYLIST_EXTENSION: &str = "m3u";

/// Derive the `.m3u` file name for a playlist
///
/// Forbidden characters become `_`, surrounding whitespace is trimmed, and a
/// blank name falls back to `playlist_<id>`. Trailing dots and spaces are
/// stripped because Windows drops them silently, and reserved device names get
/// a `_` prefix.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(playlist_filename("My/Playlist:2024", "7"), "My_Playlist_2024.m3u");
/// assert_eq!(playlist_filename("   ", "42"), "playlist_42.m3u");
/// ```
pub fn playlist_filename(name: &str, id: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if FORBIDDEN_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let mut stem = replaced.trim().to_string();
    if stem.is_empty() {
        stem = fallback_stem(id);
    }

    stem = strip_trailing_dots(&stem).to_string();
    // A name made only of dots would otherwise become a bare extension
    if stem.is_empty() {
        stem = fallback_stem(id);
    }

    if is_reserved_name(&stem) {
        stem.insert(0, '_');
    }

    format!("{}.{}", stem, PLAYLIST_EXTENSION)
}

fn fallback_stem(id: &str) -> String {
    format!("playlist_{}", id)
}

fn strip_trailing_dots(stem: &str) -> &str {
    stem.trim_end_matches(|c: char| c == '.' || c.is_whitespace())
}

fn is_reserved_name(stem: &str) -> bool {
    let upper = stem.to_uppercase();
    RESERVED_NAMES.contains(&upper.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forbidden_characters_replaced() {
        assert_eq!(
            playlist_filename("My/Playlist:2024", "1"),
            "My_Playlist_2024.m3u"
        );
        assert_eq!(
            playlist_filename("a<b>c\"d\\e|f?g*h", "1"),
            "a_b_c_d_e_f_g_h.m3u"
        );
    }

    #[test]
    fn test_blank_name_falls_back_to_id() {
        assert_eq!(playlist_filename("", "42"), "playlist_42.m3u");
        assert_eq!(playlist_filename("   ", "42"), "playlist_42.m3u");
        assert_eq!(playlist_filename("\t\n", "42"), "playlist_42.m3u");
    }

    #[test]
    fn test_only_dots_falls_back_to_id() {
        assert_eq!(playlist_filename("...", "9"), "playlist_9.m3u");
        assert_eq!(playlist_filename(". . .", "9"), "playlist_9.m3u");
    }

    #[test]
    fn test_reserved_names_prefixed() {
        assert_eq!(playlist_filename("CON", "1"), "_CON.m3u");
        assert_eq!(playlist_filename("con", "1"), "_con.m3u");
        assert_eq!(playlist_filename("Lpt9", "1"), "_Lpt9.m3u");
        assert_eq!(playlist_filename("nul.", "1"), "_nul.m3u");
    }

    #[test]
    fn test_reserved_name_match_is_exact() {
        assert_eq!(playlist_filename("CONCERT", "1"), "CONCERT.m3u");
        assert_eq!(playlist_filename("COM10", "1"), "COM10.m3u");
        assert_eq!(playlist_filename("LPT0", "1"), "LPT0.m3u");
    }

    #[test]
    fn test_trailing_dots_and_spaces_stripped() {
        assert_eq!(playlist_filename("Trailing...   ", "1"), "Trailing.m3u");
        assert_eq!(playlist_filename("Mixed. . .", "1"), "Mixed.m3u");
        assert_eq!(playlist_filename("Vol. 2", "1"), "Vol. 2.m3u");
    }

    #[test]
    fn test_whitespace_trimmed() {
        assert_eq!(playlist_filename("  Road Trip  ", "1"), "Road Trip.m3u");
    }

    #[test]
    fn test_no_changes_needed() {
        assert_eq!(playlist_filename("Normal Playlist", "1"), "Normal Playlist.m3u");
        assert_eq!(playlist_filename("Ünïcödé ✓", "1"), "Ünïcödé ✓.m3u");
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let names = ["My/Playlist:2024", "", "CON", "Trailing...   ", "a|b"];
        for name in names {
            assert_eq!(playlist_filename(name, "5"), playlist_filename(name, "5"));
        }
    }

    #[test]
    fn test_distinct_names_can_collide() {
        assert_eq!(playlist_filename("A/B", "1"), playlist_filename("A:B", "2"));
    }
}
