//! Pastor API endpoints.
//!
//! Same gating split as messages: the public list only carries active
//! pastors, the admin list carries everyone.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_uuid, success, ApiResult};
use crate::errors::AppError;
use crate::models::{CreatePastorRequest, Pastor, UpdatePastorRequest};
use crate::AppState;

/// GET /api/pastors - List active pastors.
pub async fn list_active_pastors(State(state): State<AppState>) -> ApiResult<Vec<Pastor>> {
    let pastors = state.repo.list_active_pastors().await?;
    success("Pastors retrieved successfully", pastors)
}

/// GET /api/admin/pastors - List all pastors including inactive ones.
pub async fn list_all_pastors(State(state): State<AppState>) -> ApiResult<Vec<Pastor>> {
    let pastors = state.repo.list_all_pastors().await?;
    success("Pastors retrieved successfully", pastors)
}

/// GET /api/pastors/:id - Get a single pastor.
pub async fn get_pastor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Pastor> {
    require_uuid(&id)?;

    match state.repo.get_pastor(&id).await? {
        Some(pastor) => success("Pastor retrieved successfully", pastor),
        None => Err(AppError::NotFound(format!("Pastor {} not found", id))),
    }
}

/// POST /api/admin/pastors - Create a new pastor.
pub async fn create_pastor(
    State(state): State<AppState>,
    Json(request): Json<CreatePastorRequest>,
) -> ApiResult<Pastor> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }

    let pastor = state.repo.create_pastor(&request).await?;
    success("Pastor created successfully", pastor)
}

/// PUT /api/admin/pastors/:id - Update a pastor.
pub async fn update_pastor(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdatePastorRequest>,
) -> ApiResult<Pastor> {
    require_uuid(&id)?;

    let pastor = state.repo.update_pastor(&id, &request).await?;
    success("Pastor updated successfully", pastor)
}

/// DELETE /api/admin/pastors/:id - Delete a pastor.
pub async fn delete_pastor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_uuid(&id)?;

    state.repo.delete_pastor(&id).await?;
    success("Pastor deleted successfully", ())
}
