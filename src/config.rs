//! Configuration management for the now-playing bot.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files. Unlike a set of ambient lookups, everything is read once
//! at startup into an explicit [`Config`] value which is then handed to each
//! component.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the current working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{env, fmt, path::PathBuf, time::Duration};

use crate::utils;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
pub const DEFAULT_HISTORY_FILE: &str = "data.json";
pub const DEFAULT_AUDIO_FILE: &str = "audio.mp3";
pub const DEFAULT_YTDLP_BIN: &str = "yt-dlp";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Missing(String),
    Invalid { key: String, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid { key, reason } => write!(f, "{} is invalid: {}", key, reason),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Loads environment variables from `.env` files.
///
/// Looks for a `.env` file in the current working directory first and then in
/// the platform-specific local data directory under `spotgram/.env`. Values
/// already present in the process environment are never overwritten, and a
/// missing file is not an error.
///
/// # Directory Structure
///
/// The data directory file is looked up in:
/// - Linux: `~/.local/share/spotgram/.env`
/// - macOS: `~/Library/Application Support/spotgram/.env`
/// - Windows: `%LOCALAPPDATA%/spotgram/.env`
///
/// # Errors
///
/// This function will return an error if:
/// - The data directory cannot be created
/// - An existing `.env` file cannot be read or parsed
pub async fn load_env() -> Result<(), String> {
    match dotenv::dotenv() {
        Ok(_) => {}
        Err(dotenv::Error::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.to_string()),
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotgram/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}

/// Credentials and endpoints of the Spotify Web API.
#[derive(Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub api_url: String,
    pub token_url: String,
}

impl fmt::Debug for SpotifyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpotifyConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("refresh_token", &"***")
            .field("api_url", &self.api_url)
            .field("token_url", &self.token_url)
            .finish()
    }
}

impl SpotifyConfig {
    /// Reads the Spotify settings through `lookup`.
    ///
    /// Requires `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET` and
    /// `SPOTIFY_REFRESH_TOKEN`. `SPOTIFY_API_URL` and `SPOTIFY_API_TOKEN_URL`
    /// fall back to the public Spotify endpoints.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(SpotifyConfig {
            client_id: required(lookup, "SPOTIFY_CLIENT_ID")?,
            client_secret: required(lookup, "SPOTIFY_CLIENT_SECRET")?,
            refresh_token: required(lookup, "SPOTIFY_REFRESH_TOKEN")?,
            api_url: trimmed_url(optional(lookup, "SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL)),
            token_url: optional(lookup, "SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
        })
    }
}

/// Bot credentials and the single chat the bot posts to.
#[derive(Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub api_url: String,
}

impl fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"***")
            .field("chat_id", &self.chat_id)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl TelegramConfig {
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(TelegramConfig {
            bot_token: required(lookup, "BOT_TOKEN")?,
            chat_id: required(lookup, "CHAT_ID")?,
            api_url: trimmed_url(optional(lookup, "TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL)),
        })
    }
}

#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub bin: String,
    pub audio_file: PathBuf,
}

impl DownloadConfig {
    pub fn from_lookup<F>(lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        DownloadConfig {
            bin: optional(lookup, "YTDLP_BIN", DEFAULT_YTDLP_BIN),
            audio_file: PathBuf::from(optional(lookup, "AUDIO_FILE", DEFAULT_AUDIO_FILE)),
        }
    }
}

/// Complete runtime configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub spotify: SpotifyConfig,
    pub telegram: TelegramConfig,
    pub download: DownloadConfig,
    pub poll_interval: Duration,
    /// Enables the persisted history used to skip already posted tracks.
    pub upload: bool,
    /// Edit the previously sent message instead of sending a new one.
    pub edit_message: bool,
    pub history_file: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first so that `.env` files are taken into account.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&env_lookup)
    }

    /// Builds the configuration from an arbitrary key/value source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an unset or empty required
    /// variable and [`ConfigError::Invalid`] for values that don't parse,
    /// e.g. a `POLL_INTERVAL` of `0` or `UPLOAD=maybe`.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config {
            spotify: SpotifyConfig::from_lookup(lookup)?,
            telegram: TelegramConfig::from_lookup(lookup)?,
            download: DownloadConfig::from_lookup(lookup),
            poll_interval: poll_interval(lookup)?,
            upload: flag(lookup, "UPLOAD")?,
            edit_message: flag(lookup, "EDIT_MESSAGE")?,
            history_file: history_file(lookup),
        })
    }
}

/// Location of the history file (`HISTORY_FILE`, default `data.json`).
pub fn history_file<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    PathBuf::from(optional(lookup, "HISTORY_FILE", DEFAULT_HISTORY_FILE))
}

/// Lookup into the process environment, for the `from_lookup` constructors.
pub fn env_lookup(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn poll_interval<F>(lookup: &F) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = non_empty(lookup, "POLL_INTERVAL") else {
        return Ok(Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS));
    };

    match raw.trim().parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            key: "POLL_INTERVAL".to_string(),
            reason: "must be greater than zero".to_string(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            key: "POLL_INTERVAL".to_string(),
            reason: e.to_string(),
        }),
    }
}

fn flag<F>(lookup: &F, key: &str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => utils::parse_flag(&raw).map_err(|reason| ConfigError::Invalid {
            key: key.to_string(),
            reason,
        }),
        None => Ok(false),
    }
}

fn required<F>(lookup: &F, key: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).ok_or_else(|| ConfigError::Missing(key.to_string()))
}

fn optional<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).unwrap_or_else(|| default.to_string())
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.trim().is_empty())
}

fn trimmed_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
