//! Activity API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_uuid, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Activity, CreateActivityRequest, UpdateActivityRequest};
use crate::AppState;

/// GET /api/activities - List all activities.
pub async fn list_activities(State(state): State<AppState>) -> ApiResult<Vec<Activity>> {
    let activities = state.repo.list_activities().await?;
    success("Activities retrieved successfully", activities)
}

/// GET /api/activities/:id - Get a single activity.
pub async fn get_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Activity> {
    require_uuid(&id)?;

    match state.repo.get_activity(&id).await? {
        Some(activity) => success("Activity retrieved successfully", activity),
        None => Err(AppError::NotFound(format!("Activity {} not found", id))),
    }
}

/// POST /api/admin/activities - Create a new activity.
pub async fn create_activity(
    State(state): State<AppState>,
    Json(request): Json<CreateActivityRequest>,
) -> ApiResult<Activity> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if request.date.trim().is_empty() {
        return Err(AppError::Validation("Date is required".to_string()));
    }
    if request.description.trim().is_empty() {
        return Err(AppError::Validation("Description is required".to_string()));
    }

    let activity = state.repo.create_activity(&request).await?;
    success("Activity created successfully", activity)
}

/// PUT /api/admin/activities/:id - Update an activity.
pub async fn update_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateActivityRequest>,
) -> ApiResult<Activity> {
    require_uuid(&id)?;

    let activity = state.repo.update_activity(&id, &request).await?;
    success("Activity updated successfully", activity)
}

/// DELETE /api/admin/activities/:id - Delete an activity and its memories.
pub async fn delete_activity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_uuid(&id)?;

    state.repo.delete_activity(&id).await?;
    success("Activity deleted successfully", ())
}
