use std::path::Path;

use reqwest::{
    StatusCode,
    multipart::{Form, Part},
};

use crate::{
    telegram::TelegramError,
    types::{AudioUpload, InputMediaAudio, TelegramResponse},
};

const AUDIO_FIELD: &str = "audio";
const THUMBNAIL_FIELD: &str = "thumbnail";

/// Multipart body for `sendAudio`.
pub async fn send_form(chat_id: &str, upload: &AudioUpload) -> Result<Form, TelegramError> {
    let form = Form::new()
        .text("chat_id", chat_id.to_string())
        .text("title", upload.title.clone())
        .text("performer", upload.performer.clone());

    attach_files(form, upload).await
}

/// Multipart body for `editMessageMedia`.
///
/// The files are referenced from the `media` JSON through `attach://` URLs
/// and travel as regular parts of the same form.
pub async fn edit_form(
    chat_id: &str,
    message_id: i64,
    upload: &AudioUpload,
) -> Result<Form, TelegramError> {
    let media = serde_json::to_string(&edit_media(upload))?;
    let form = Form::new()
        .text("chat_id", chat_id.to_string())
        .text("message_id", message_id.to_string())
        .text("media", media);

    attach_files(form, upload).await
}

/// The `InputMediaAudio` describing an in-place edit.
pub fn edit_media(upload: &AudioUpload) -> InputMediaAudio {
    InputMediaAudio {
        kind: "audio".to_string(),
        media: format!("attach://{}", AUDIO_FIELD),
        title: upload.title.clone(),
        performer: upload.performer.clone(),
        thumbnail: upload
            .thumbnail
            .as_ref()
            .map(|_| format!("attach://{}", THUMBNAIL_FIELD)),
    }
}

async fn attach_files(form: Form, upload: &AudioUpload) -> Result<Form, TelegramError> {
    let mut form = form.part(AUDIO_FIELD, file_part(&upload.audio, "audio/mpeg").await?);
    if let Some(thumbnail) = &upload.thumbnail {
        form = form.part(
            THUMBNAIL_FIELD,
            file_part(thumbnail, image_mime(thumbnail)).await?,
        );
    }
    Ok(form)
}

async fn file_part(path: &Path, mime: &str) -> Result<Part, TelegramError> {
    let bytes = async_fs::read(path)
        .await
        .map_err(|source| TelegramError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "file".to_string());

    Ok(Part::bytes(bytes).file_name(file_name).mime_str(mime)?)
}

/// Content type for a thumbnail, derived from its extension.
pub fn image_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Interprets a Bot API response and extracts the message id.
///
/// `previous` is returned when the call succeeded but the result is not a
/// message (edits of inline messages answer with a bare `true`).
pub fn parse_response(
    status: StatusCode,
    body: &str,
    previous: Option<i64>,
) -> Result<i64, TelegramError> {
    let decoded = serde_json::from_str::<TelegramResponse>(body);

    if status != StatusCode::OK {
        let (error_code, description) = match &decoded {
            Ok(res) => (res.error_code, res.description.clone().unwrap_or_default()),
            Err(_) => (None, body.to_string()),
        };
        return Err(TelegramError::StatusError {
            status,
            error_code,
            description,
        });
    }

    let res = decoded?;
    if !res.ok {
        return Err(TelegramError::ApiError {
            error_code: res.error_code,
            description: res.description.unwrap_or_default(),
        });
    }

    res.result
        .as_ref()
        .and_then(|r| r.get("message_id"))
        .and_then(|id| id.as_i64())
        .or(previous)
        .ok_or(TelegramError::MissingMessageId)
}
