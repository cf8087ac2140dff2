//! Author API endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::{require_uuid, success, ApiResult};
use crate::errors::AppError;
use crate::models::{Author, CreateAuthorRequest, UpdateAuthorRequest};
use crate::AppState;

/// GET /api/authors - List all authors.
pub async fn list_authors(State(state): State<AppState>) -> ApiResult<Vec<Author>> {
    let authors = state.repo.list_authors().await?;
    success("Authors retrieved successfully", authors)
}

/// GET /api/authors/:id - Get a single author.
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Author> {
    require_uuid(&id)?;

    match state.repo.get_author(&id).await? {
        Some(author) => success("Author retrieved successfully", author),
        None => Err(AppError::NotFound(format!("Author {} not found", id))),
    }
}

/// POST /api/admin/authors - Create a new author.
pub async fn create_author(
    State(state): State<AppState>,
    Json(request): Json<CreateAuthorRequest>,
) -> ApiResult<Author> {
    if request.first_name.trim().is_empty() {
        return Err(AppError::Validation("First name is required".to_string()));
    }
    if request.last_name.trim().is_empty() {
        return Err(AppError::Validation("Last name is required".to_string()));
    }

    let author = state.repo.create_author(&request).await?;
    success("Author created successfully", author)
}

/// PUT /api/admin/authors/:id - Update an author.
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateAuthorRequest>,
) -> ApiResult<Author> {
    require_uuid(&id)?;

    let author = state.repo.update_author(&id, &request).await?;
    success("Author updated successfully", author)
}

/// DELETE /api/admin/authors/:id - Delete an author. Articles keep their
/// author id; a dangling reference is accepted.
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_uuid(&id)?;

    state.repo.delete_author(&id).await?;
    success("Author deleted successfully", ())
}
