//! Coordinator API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_uuid, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Coordinator, CreateCoordinatorRequest, UpdateCoordinatorRequest};
use crate::AppState;

/// GET /api/coordinators - List all coordinators.
pub async fn list_coordinators(State(state): State<AppState>) -> ApiResult<Vec<Coordinator>> {
    let coordinators = state.repo.list_coordinators().await?;
    success("Coordinators retrieved successfully", coordinators)
}

/// GET /api/coordinators/featured - List featured coordinators for the
/// landing page strip.
pub async fn list_featured_coordinators(
    State(state): State<AppState>,
) -> ApiResult<Vec<Coordinator>> {
    let coordinators = state.repo.list_featured_coordinators().await?;
    success("Coordinators retrieved successfully", coordinators)
}

/// GET /api/coordinators/:id - Get a single coordinator.
pub async fn get_coordinator(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Coordinator> {
    require_uuid(&id)?;

    match state.repo.get_coordinator(&id).await? {
        Some(coordinator) => success("Coordinator retrieved successfully", coordinator),
        None => Err(AppError::NotFound(format!("Coordinator {} not found", id))),
    }
}

/// POST /api/admin/coordinators - Create a new coordinator.
pub async fn create_coordinator(
    State(state): State<AppState>,
    Json(request): Json<CreateCoordinatorRequest>,
) -> ApiResult<Coordinator> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let coordinator = state.repo.create_coordinator(&request).await?;
    success("Coordinator created successfully", coordinator)
}

/// PUT /api/admin/coordinators/:id - Update a coordinator.
pub async fn update_coordinator(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCoordinatorRequest>,
) -> ApiResult<Coordinator> {
    require_uuid(&id)?;

    let coordinator = state.repo.update_coordinator(&id, &request).await?;
    success("Coordinator updated successfully", coordinator)
}

/// DELETE /api/admin/coordinators/:id - Delete a coordinator. Messages keep
/// their coordinator id; a dangling reference is accepted.
pub async fn delete_coordinator(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_uuid(&id)?;

    state.repo.delete_coordinator(&id).await?;
    success("Coordinator deleted successfully", ())
}
