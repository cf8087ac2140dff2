//! Memory API endpoints: gallery photos grouped under activities.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_uuid, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreateMemoryRequest, Memory, UpdateMemoryRequest};
use crate::AppState;

/// GET /api/memories - List all memories.
pub async fn list_memories(State(state): State<AppState>) -> ApiResult<Vec<Memory>> {
    let memories = state.repo.list_memories().await?;
    success("Memories retrieved successfully", memories)
}

/// GET /api/memories/activity/:activityId - List memories for one activity.
pub async fn list_memories_by_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> ApiResult<Vec<Memory>> {
    require_uuid(&activity_id)?;

    let memories = state.repo.list_memories_by_activity(&activity_id).await?;
    success("Memories retrieved successfully", memories)
}

/// GET /api/memories/:id - Get a single memory.
pub async fn get_memory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Memory> {
    require_uuid(&id)?;

    match state.repo.get_memory(&id).await? {
        Some(memory) => success("Memory retrieved successfully", memory),
        None => Err(AppError::NotFound(format!("Memory {} not found", id))),
    }
}

/// POST /api/admin/memories - Create a new memory.
pub async fn create_memory(
    State(state): State<AppState>,
    Json(request): Json<CreateMemoryRequest>,
) -> ApiResult<Memory> {
    if request.image_url.trim().is_empty() {
        return Err(AppError::Validation("Image URL is required".to_string()));
    }
    if request.height <= 0 || request.width <= 0 {
        return Err(AppError::Validation(
            "Height and width must be positive".to_string(),
        ));
    }
    if request.img_type.trim().is_empty() {
        return Err(AppError::Validation("Image type is required".to_string()));
    }
    if request.activity_id.trim().is_empty() {
        return Err(AppError::Validation("Activity id is required".to_string()));
    }

    let memory = state.repo.create_memory(&request).await?;
    success("Memory created successfully", memory)
}

/// PUT /api/admin/memories/:id - Update a memory.
pub async fn update_memory(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateMemoryRequest>,
) -> ApiResult<Memory> {
    require_uuid(&id)?;

    let memory = state.repo.update_memory(&id, &request).await?;
    success("Memory updated successfully", memory)
}

/// DELETE /api/admin/memories/:id - Delete a memory.
pub async fn delete_memory(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_uuid(&id)?;

    state.repo.delete_memory(&id).await?;
    success("Memory deleted successfully", ())
}

/// DELETE /api/admin/memories/activity/:activityId - Bulk-delete every
/// memory under one activity.
pub async fn delete_memories_by_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> ApiResult<u64> {
    require_uuid(&activity_id)?;

    let removed = state.repo.delete_memories_by_activity(&activity_id).await?;
    success(format!("{} memories deleted", removed), removed)
}
