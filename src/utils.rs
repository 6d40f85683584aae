use base64::{Engine, engine::general_purpose::STANDARD};

use crate::types::Track;

/// Joins artist names in the order Spotify returned them.
pub fn join_artists(artists: &[String]) -> String {
    artists.join(", ")
}

/// Identity of a track for deduplication: `"{name} - {artists}"`.
///
/// No normalization is applied, so case, whitespace and artist order all
/// produce distinct keys.
pub fn track_key(track: &Track) -> String {
    format!("{} - {}", track.name, join_artists(&track.artists))
}

/// Free-text query handed to the downloader: `"{name} {artists}"`.
pub fn search_query(track: &Track) -> String {
    format!("{} {}", track.name, join_artists(&track.artists))
}

/// Value of an HTTP Basic `Authorization` header for `id:secret`.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    let raw = format!("{}:{}", client_id, client_secret);
    format!("Basic {}", STANDARD.encode(raw))
}

/// Parses an environment style boolean.
///
/// Empty values count as `false` so that `UPLOAD=` behaves like an unset
/// variable.
pub fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "" | "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!("invalid boolean '{}'", other)),
    }
}

/// Keeps only the last `max` characters of a (possibly long) tool output.
pub fn truncate_tail(text: &str, max: usize) -> &str {
    let count = text.chars().count();
    if count <= max {
        return text;
    }
    let skip = count - max;
    match text.char_indices().nth(skip) {
        Some((idx, _)) => &text[idx..],
        None => text,
    }
}
