//! Category API endpoints.
//!
//! The public list only shows active categories in `sort_order`; the admin
//! list shows everything. Category names are stored denormalized on audio
//! messages, so deleting a category never rewrites tagged messages.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_uuid, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Category, CreateCategoryRequest, UpdateCategoryRequest};
use crate::AppState;

/// GET /api/audio-messages/categories - List active categories for the
/// public filter dropdown.
pub async fn list_active_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = state.repo.list_active_categories().await?;
    success("Categories retrieved successfully", categories)
}

/// GET /api/admin/categories - List all categories including inactive ones.
pub async fn list_all_categories(State(state): State<AppState>) -> ApiResult<Vec<Category>> {
    let categories = state.repo.list_all_categories().await?;
    success("Categories retrieved successfully", categories)
}

/// GET /api/admin/categories/:id - Get a single category.
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Category> {
    require_uuid(&id)?;

    match state.repo.get_category(&id).await? {
        Some(category) => success("Category retrieved successfully", category),
        None => Err(AppError::NotFound(format!("Category {} not found", id))),
    }
}

/// POST /api/admin/categories - Create a new category.
pub async fn create_category(
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> ApiResult<Category> {
    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }

    let category = state.repo.create_category(&request).await?;
    success("Category created successfully", category)
}

/// PUT /api/admin/categories/:id - Update a category.
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> ApiResult<Category> {
    require_uuid(&id)?;

    let category = state.repo.update_category(&id, &request).await?;
    success("Category updated successfully", category)
}

/// DELETE /api/admin/categories/:id - Delete a category. Audio messages
/// tagged with its name keep the orphaned tag.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_uuid(&id)?;

    state.repo.delete_category(&id).await?;
    success("Category deleted successfully", ())
}
