//! # Telegram Publisher Module
//!
//! Posts the downloaded audio to a single Telegram chat through the Bot API.
//! A fresh track is sent with `sendAudio`. When the poller remembers the
//! message it sent last (edit mode), the same message is updated in place
//! with `editMessageMedia` instead.
//!
//! Uploads are multipart form posts carrying the audio file and, when one
//! was found, the thumbnail. They use a longer deadline than the Spotify
//! calls since the payload is a whole mp3.

pub mod audio;

use std::{fmt, path::PathBuf, time::Duration};

use reqwest::{Client, StatusCode};

use crate::{Res, config::TelegramConfig, poller::Publisher, types::AudioUpload};

/// Deadline for a single upload.
pub const UPLOAD_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug)]
pub enum TelegramError {
    IoError { path: PathBuf, source: std::io::Error },
    HttpError(reqwest::Error),
    StatusError {
        status: StatusCode,
        error_code: Option<i64>,
        description: String,
    },
    ApiError { error_code: Option<i64>, description: String },
    SerdeError(serde_json::Error),
    MissingMessageId,
}

impl fmt::Display for TelegramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelegramError::IoError { path, source } => {
                write!(f, "cannot read {}: {}", path.display(), source)
            }
            TelegramError::HttpError(e) => write!(f, "telegram request failed: {}", e),
            TelegramError::StatusError {
                status,
                error_code,
                description,
            } => match error_code {
                Some(code) => write!(
                    f,
                    "telegram api request failed with status {} (error {}): {}",
                    status.as_u16(),
                    code,
                    description
                ),
                None => write!(
                    f,
                    "telegram api request failed with status {}: {}",
                    status.as_u16(),
                    description
                ),
            },
            TelegramError::ApiError {
                error_code,
                description,
            } => match error_code {
                Some(code) => write!(f, "telegram api error {}: {}", code, description),
                None => write!(f, "telegram api error: {}", description),
            },
            TelegramError::SerdeError(e) => write!(f, "failed to decode telegram response: {}", e),
            TelegramError::MissingMessageId => write!(f, "telegram response carries no message id"),
        }
    }
}

impl std::error::Error for TelegramError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelegramError::IoError { source, .. } => Some(source),
            TelegramError::HttpError(e) => Some(e),
            TelegramError::SerdeError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        // request URLs carry the bot token
        TelegramError::HttpError(err.without_url())
    }
}

impl From<serde_json::Error> for TelegramError {
    fn from(err: serde_json::Error) -> Self {
        TelegramError::SerdeError(err)
    }
}

/// Bot API client posting into the configured chat.
pub struct TelegramPublisher {
    client: Client,
    config: TelegramConfig,
}

impl TelegramPublisher {
    pub fn new(config: TelegramConfig) -> Result<Self, TelegramError> {
        let client = Client::builder().timeout(UPLOAD_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{api}/bot{token}/{method}",
            api = self.config.api_url,
            token = self.config.bot_token,
            method = method
        )
    }

    /// Sends a new audio message and returns its id.
    pub async fn send_audio(&self, upload: &AudioUpload) -> Result<i64, TelegramError> {
        let form = audio::send_form(&self.config.chat_id, upload).await?;
        let res = self
            .client
            .post(self.method_url("sendAudio"))
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        audio::parse_response(status, &body, None)
    }

    /// Replaces the audio of an already sent message.
    pub async fn edit_audio(
        &self,
        message_id: i64,
        upload: &AudioUpload,
    ) -> Result<i64, TelegramError> {
        let form = audio::edit_form(&self.config.chat_id, message_id, upload).await?;
        let res = self
            .client
            .post(self.method_url("editMessageMedia"))
            .multipart(form)
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        audio::parse_response(status, &body, Some(message_id))
    }
}

impl Publisher for TelegramPublisher {
    async fn publish(&self, upload: &AudioUpload, message_id: Option<i64>) -> Res<i64> {
        let id = match message_id {
            Some(id) => self.edit_audio(id, upload).await?,
            None => self.send_audio(upload).await?,
        };
        Ok(id)
    }
}
