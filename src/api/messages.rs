//! Message API endpoints.
//!
//! Publication gating happens here, server-side: the public surface never
//! sees a draft. Admin routes skip the gate.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_uuid, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateMessageRequest, Message, UpdateMessageRequest};
use crate::AppState;

/// GET /api/messages - List published messages.
pub async fn list_published_messages(State(state): State<AppState>) -> ApiResult<Vec<Message>> {
    let messages = state.repo.list_published_messages().await?;
    success("Messages retrieved successfully", messages)
}

/// GET /api/admin/messages - List all messages including drafts.
pub async fn list_all_messages(State(state): State<AppState>) -> ApiResult<Vec<Message>> {
    let messages = state.repo.list_all_messages().await?;
    success("Messages retrieved successfully", messages)
}

/// GET /api/messages/coordinator/:coordinatorId - List published messages
/// from one coordinator.
pub async fn list_messages_by_coordinator(
    State(state): State<AppState>,
    Path(coordinator_id): Path<String>,
) -> ApiResult<Vec<Message>> {
    require_uuid(&coordinator_id)?;

    let messages = state
        .repo
        .list_published_messages_by_coordinator(&coordinator_id)
        .await?;
    success("Messages retrieved successfully", messages)
}

/// GET /api/messages/:id - Get a single published message. Drafts are
/// indistinguishable from missing records on the public surface.
pub async fn get_published_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Message> {
    require_uuid(&id)?;

    match state.repo.get_message(&id).await? {
        Some(message) if message.is_published => {
            success("Message retrieved successfully", message)
        }
        _ => Err(AppError::NotFound(format!("Message {} not found", id))),
    }
}

/// GET /api/admin/messages/:id - Get a single message, draft or published.
pub async fn get_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Message> {
    require_uuid(&id)?;

    match state.repo.get_message(&id).await? {
        Some(message) => success("Message retrieved successfully", message),
        None => Err(AppError::NotFound(format!("Message {} not found", id))),
    }
}

/// POST /api/admin/messages - Create a new message.
pub async fn create_message(
    State(state): State<AppState>,
    Json(request): Json<CreateMessageRequest>,
) -> ApiResult<Message> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.content.trim().is_empty() {
        return Err(AppError::Validation("Content is required".to_string()));
    }
    if request.coordinator_id.trim().is_empty() {
        return Err(AppError::Validation(
            "Coordinator id is required".to_string(),
        ));
    }

    let message = state.repo.create_message(&request).await?;
    success("Message created successfully", message)
}

/// PUT /api/admin/messages/:id - Update a message.
pub async fn update_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateMessageRequest>,
) -> ApiResult<Message> {
    require_uuid(&id)?;

    let message = state.repo.update_message(&id, &request).await?;
    success("Message updated successfully", message)
}

/// DELETE /api/admin/messages/:id - Delete a message.
pub async fn delete_message(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_uuid(&id)?;

    state.repo.delete_message(&id).await?;
    success("Message deleted successfully", ())
}
