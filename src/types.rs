use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Response of the Spotify token endpoint for the `refresh_token` grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentlyPlayingResponse {
    pub item: Option<PlayingItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayingItem {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<PlayingArtist>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayingArtist {
    pub name: String,
}

/// A track as observed on a single poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub name: String,
    pub artists: Vec<String>,
}

impl From<PlayingItem> for Track {
    fn from(item: PlayingItem) -> Self {
        Track {
            name: item.name,
            artists: item.artists.into_iter().map(|a| a.name).collect(),
        }
    }
}

/// Everything the publisher needs to post one audio message.
#[derive(Debug, Clone)]
pub struct AudioUpload {
    pub audio: PathBuf,
    pub title: String,
    pub performer: String,
    pub thumbnail: Option<PathBuf>,
}

/// Telegram `InputMediaAudio`, sent as the `media` field of `editMessageMedia`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputMediaAudio {
    #[serde(rename = "type")]
    pub kind: String,
    pub media: String,
    pub title: String,
    pub performer: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramResponse {
    pub ok: bool,
    pub result: Option<serde_json::Value>,
    pub error_code: Option<i64>,
    pub description: Option<String>,
}

#[derive(Tabled)]
pub struct HistoryTableRow {
    pub track: String,
    pub processed: bool,
}
