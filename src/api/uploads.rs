//! File upload endpoints.
//!
//! All uploads are multipart and admin-gated. Validation runs before any
//! disk write: MIME type against an allow-list, then a chunked read that
//! aborts as soon as the size ceiling is crossed instead of buffering an
//! oversized body. Image uploads recover from storage failures with a
//! default asset; audio does not.

use axum::extract::multipart::{Field, Multipart};
use axum::extract::State;
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{AudioMessage, CreateAudioMessageFields};
use crate::storage::UploadKind;
use crate::AppState;

pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;
pub const MAX_AUDIO_BYTES: usize = 100 * 1024 * 1024;

/// Result of a standalone upload: the public URL plus whether the default
/// asset was substituted for a failed write.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub url: String,
    pub fallback: bool,
}

/// POST /api/admin/{entity}/upload-image - Store an entity image and return
/// its public URL. Expects an `image` multipart field.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<UploadResponse> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("image") {
            continue;
        }

        let ext = require_image_type(field.content_type())?;
        let data = read_limited(field, MAX_IMAGE_BYTES).await?;
        let (url, fallback) = state
            .storage
            .store_with_fallback(UploadKind::Image, ext, &data)
            .await?;

        let message = if fallback {
            "Image upload failed; a default image was substituted"
        } else {
            "Image uploaded successfully"
        };
        return success(message, UploadResponse { url, fallback });
    }

    Err(AppError::Validation("An image field is required".to_string()))
}

/// POST /api/admin/memories/upload-photo - Store a gallery photo. Same
/// allow-list as images with a larger ceiling. Expects a `photo` field.
pub async fn upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<UploadResponse> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("photo") {
            continue;
        }

        let ext = require_image_type(field.content_type())?;
        let data = read_limited(field, MAX_PHOTO_BYTES).await?;
        let (url, fallback) = state
            .storage
            .store_with_fallback(UploadKind::Photo, ext, &data)
            .await?;

        let message = if fallback {
            "Photo upload failed; a default image was substituted"
        } else {
            "Photo uploaded successfully"
        };
        return success(message, UploadResponse { url, fallback });
    }

    Err(AppError::Validation("A photo field is required".to_string()))
}

/// POST /api/admin/audio-messages - Multipart create: metadata text fields,
/// a required `audio` file and an optional `thumbnail`. The files are
/// stored first; the record is only inserted once they are on disk, so a
/// failed upload never leaves a half-created entity.
pub async fn create_audio_message(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<AudioMessage> {
    let mut fields = CreateAudioMessageFields::default();
    let mut audio: Option<(String, Vec<u8>)> = None;
    let mut thumbnail: Option<(&'static str, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "title" => fields.title = field.text().await?,
            "description" => {
                let text = field.text().await?;
                if !text.is_empty() {
                    fields.description = Some(text);
                }
            }
            "speaker" => fields.speaker = field.text().await?,
            "date" => fields.date = field.text().await?,
            "duration" => {
                let text = field.text().await?;
                if !text.is_empty() {
                    fields.duration = Some(text);
                }
            }
            "category" => fields.category = field.text().await?,
            "audio" => {
                let ext = require_audio_type(field.content_type(), field.file_name())?;
                let data = read_limited(field, MAX_AUDIO_BYTES).await?;
                audio = Some((ext, data));
            }
            "thumbnail" => {
                let ext = require_image_type(field.content_type())?;
                let data = read_limited(field, MAX_IMAGE_BYTES).await?;
                thumbnail = Some((ext, data));
            }
            _ => {}
        }
    }

    if fields.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if fields.speaker.trim().is_empty() {
        return Err(AppError::Validation("Speaker is required".to_string()));
    }
    if fields.date.trim().is_empty() {
        return Err(AppError::Validation("Date is required".to_string()));
    }
    if fields.category.trim().is_empty() {
        return Err(AppError::Validation("Category is required".to_string()));
    }
    let (audio_ext, audio_data) = audio
        .ok_or_else(|| AppError::Validation("An audio file is required".to_string()))?;

    // The audio file is the content itself: a failed write is a hard error,
    // unlike entity images.
    let audio_url = state
        .storage
        .store(UploadKind::Audio, &audio_ext, &audio_data)
        .await?;

    let (thumbnail_url, thumbnail_fallback) = match thumbnail {
        Some((ext, data)) => {
            let (url, fallback) = state
                .storage
                .store_with_fallback(UploadKind::Thumbnail, ext, &data)
                .await?;
            (Some(url), fallback)
        }
        None => (None, false),
    };

    let message = state
        .repo
        .create_audio_message(&fields, &audio_url, thumbnail_url)
        .await?;
    if thumbnail_fallback {
        success(
            "Audio message created; thumbnail upload failed and a default image was substituted",
            message,
        )
    } else {
        success("Audio message created successfully", message)
    }
}

/// Read a multipart field in chunks, aborting once `limit` is crossed.
async fn read_limited(mut field: Field<'_>, limit: usize) -> Result<Vec<u8>, AppError> {
    let mut data = Vec::new();
    while let Some(chunk) = field.chunk().await? {
        if data.len() + chunk.len() > limit {
            return Err(AppError::Validation(format!(
                "File exceeds the {} MB size limit",
                limit / (1024 * 1024)
            )));
        }
        data.extend_from_slice(&chunk);
    }
    Ok(data)
}

/// Check an upload against the image allow-list and map it to an extension.
fn require_image_type(content_type: Option<&str>) -> Result<&'static str, AppError> {
    match content_type {
        Some("image/jpeg") => Ok("jpg"),
        Some("image/png") => Ok("png"),
        Some("image/gif") => Ok("gif"),
        Some("image/webp") => Ok("webp"),
        other => Err(AppError::Validation(format!(
            "Unsupported image type: {}",
            other.unwrap_or("unknown")
        ))),
    }
}

/// Accept any `audio/*` upload and derive a file extension from the MIME
/// subtype, falling back to the original file name.
fn require_audio_type(
    content_type: Option<&str>,
    file_name: Option<&str>,
) -> Result<String, AppError> {
    let mime = content_type.unwrap_or("");
    if !mime.starts_with("audio/") {
        return Err(AppError::Validation(format!(
            "Unsupported audio type: {}",
            if mime.is_empty() { "unknown" } else { mime }
        )));
    }

    let ext = match mime {
        "audio/mpeg" | "audio/mp3" => "mp3".to_string(),
        "audio/wav" | "audio/x-wav" => "wav".to_string(),
        "audio/ogg" => "ogg".to_string(),
        "audio/mp4" | "audio/x-m4a" => "m4a".to_string(),
        "audio/aac" => "aac".to_string(),
        _ => file_name
            .and_then(|n| n.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase()))
            .filter(|e| {
                !e.is_empty() && e.len() <= 8 && e.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .unwrap_or_else(|| "bin".to_string()),
    };

    Ok(ext)
}
