//! Audio message API endpoints.
//!
//! Creation is multipart (audio file plus metadata) and lives in the
//! uploads module; everything here is plain JSON.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_uuid, success, ApiResult};
use crate::errors::AppError;
use crate::models::{AudioMessage, UpdateAudioMessageRequest};
use crate::AppState;

/// GET /api/audio-messages - List all audio messages.
pub async fn list_audio_messages(State(state): State<AppState>) -> ApiResult<Vec<AudioMessage>> {
    let messages = state.repo.list_audio_messages().await?;
    success("Audio messages retrieved successfully", messages)
}

/// GET /api/audio-messages/category/:category - List audio messages under
/// one category name. The name is a denormalized string, not an id.
pub async fn list_audio_messages_by_category(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> ApiResult<Vec<AudioMessage>> {
    let messages = state.repo.list_audio_messages_by_category(&category).await?;
    success("Audio messages retrieved successfully", messages)
}

/// GET /api/audio-messages/:id - Get a single audio message.
pub async fn get_audio_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<AudioMessage> {
    require_uuid(&id)?;

    match state.repo.get_audio_message(&id).await? {
        Some(message) => success("Audio message retrieved successfully", message),
        None => Err(AppError::NotFound(format!(
            "Audio message {} not found",
            id
        ))),
    }
}

/// PUT /api/admin/audio-messages/:id - Update audio message metadata.
pub async fn update_audio_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAudioMessageRequest>,
) -> ApiResult<AudioMessage> {
    require_uuid(&id)?;

    let message = state.repo.update_audio_message(&id, &request).await?;
    success("Audio message updated successfully", message)
}

/// DELETE /api/admin/audio-messages/:id - Delete an audio message.
pub async fn delete_audio_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_uuid(&id)?;

    state.repo.delete_audio_message(&id).await?;
    success("Audio message deleted successfully", ())
}
