//! M3U playlist generation

/// Generate an M3U playlist file content
///
/// Flat format: the `#EXTM3U` header followed by one path per line, every
/// line (header included) newline-terminated. No `#EXTINF` directives.
pub fn generate_m3u(tracks: &[String]) -> String {
    let mut content = String::from("#EXTM3U\n");
    for track in tracks {
        content.push_str(track);
        content.push('\n');
    }
    content
}

/// Rewrite every path separator to a single style
///
/// Pure character substitution: `..` is not resolved and relative paths stay
/// relative.
pub fn normalize_separators(path: &str, use_forward_slash: bool) -> String {
    if use_forward_slash {
        path.replace('\\', "/")
    } else {
        path.replace('/', "\\")
    }
}
