//! # Spotify Integration Module
//!
//! This module provides the small slice of the Spotify Web API the bot needs:
//! exchanging the long-lived refresh token for an access token, and reading
//! the track that is currently playing on the user's account.
//!
//! ## Architecture
//!
//! ```text
//! Poller
//!    ↓
//! SpotifyClient::currently_playing
//!    ├── auth::access_token        POST /api/token (refresh_token grant)
//!    └── player::currently_playing GET  /me/player/currently-playing
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Authentication Strategy
//!
//! The bot is headless, so it never runs an interactive authorization flow.
//! A refresh token obtained once out of band is stored in the configuration
//! and exchanged for a fresh access token on every query. Access tokens are
//! never cached; there is no expiry bookkeeping.
//!
//! ## Error Handling
//!
//! Every failure (transport, unexpected status, undecodable body) surfaces as
//! a [`SpotifyError`]. Nothing is retried here: the poll loop simply tries
//! again on its next tick.

pub mod auth;
pub mod player;

use std::{fmt, time::Duration};

use reqwest::{Client, StatusCode};

use crate::{Res, config::SpotifyConfig, poller::NowPlaying, types::Track};

/// Deadline for token and now-playing requests.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum SpotifyError {
    HttpError(reqwest::Error),
    StatusError { status: StatusCode, body: String },
    SerdeError(serde_json::Error),
}

impl fmt::Display for SpotifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotifyError::HttpError(e) => write!(f, "spotify request failed: {}", e),
            SpotifyError::StatusError { status, body } => write!(
                f,
                "spotify request failed with status code {}: {}",
                status.as_u16(),
                body
            ),
            SpotifyError::SerdeError(e) => write!(f, "failed to decode spotify response: {}", e),
        }
    }
}

impl std::error::Error for SpotifyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpotifyError::HttpError(e) => Some(e),
            SpotifyError::SerdeError(e) => Some(e),
            SpotifyError::StatusError { .. } => None,
        }
    }
}

impl From<reqwest::Error> for SpotifyError {
    fn from(err: reqwest::Error) -> Self {
        SpotifyError::HttpError(err)
    }
}

impl From<serde_json::Error> for SpotifyError {
    fn from(err: serde_json::Error) -> Self {
        SpotifyError::SerdeError(err)
    }
}

/// Spotify client bound to one set of credentials.
pub struct SpotifyClient {
    client: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    pub fn new(config: SpotifyConfig) -> Result<Self, SpotifyError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    /// Exchanges the configured refresh token for an access token.
    pub async fn access_token(&self) -> Result<String, SpotifyError> {
        auth::access_token(&self.client, &self.config).await
    }

    /// Returns the track playing right now, or `None` when nothing is.
    pub async fn currently_playing(&self) -> Result<Option<Track>, SpotifyError> {
        let token = self.access_token().await?;
        player::currently_playing(&self.client, &self.config.api_url, &token).await
    }
}

impl NowPlaying for SpotifyClient {
    async fn current_track(&self) -> Res<Option<Track>> {
        Ok(self.currently_playing().await?)
    }
}
