//! Article API endpoints.
//!
//! The article list is the one paginated surface in the API; the public
//! site renders it as an infinite scroll.

use axum::{
    extract::{Path, Query, State},
    Json,
};

use super::{require_uuid, success, ApiResponse, ApiResult, PageQuery, Pagination};
use crate::errors::AppError;
use crate::models::{Article, CreateArticleRequest, UpdateArticleRequest};
use crate::AppState;

/// GET /api/articles - List articles, paginated, newest first.
pub async fn list_articles(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Vec<Article>> {
    let (page, limit) = query.resolve()?;

    let total = state.repo.count_articles().await?;
    // Saturating math: a page far past the end reads as an empty page
    // rather than wrapping the offset.
    let offset = page.saturating_sub(1).saturating_mul(limit);
    let articles = state.repo.list_articles_page(limit, offset).await?;

    Ok(
        ApiResponse::new("Articles retrieved successfully", articles)
            .with_pagination(Pagination::new(page, limit, total)),
    )
}

/// GET /api/articles/author/:authorId - List articles by one author.
pub async fn list_articles_by_author(
    State(state): State<AppState>,
    Path(author_id): Path<String>,
) -> ApiResult<Vec<Article>> {
    require_uuid(&author_id)?;

    let articles = state.repo.list_articles_by_author(&author_id).await?;
    success("Articles retrieved successfully", articles)
}

/// GET /api/articles/:id - Get a single article.
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Article> {
    require_uuid(&id)?;

    match state.repo.get_article(&id).await? {
        Some(article) => success("Article retrieved successfully", article),
        None => Err(AppError::NotFound(format!("Article {} not found", id))),
    }
}

/// POST /api/admin/articles - Create a new article.
pub async fn create_article(
    State(state): State<AppState>,
    Json(request): Json<CreateArticleRequest>,
) -> ApiResult<Article> {
    if request.title.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    if request.author_id.trim().is_empty() {
        return Err(AppError::Validation("Author id is required".to_string()));
    }
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("Text is required".to_string()));
    }
    if request.date.trim().is_empty() {
        return Err(AppError::Validation("Date is required".to_string()));
    }

    let article = state.repo.create_article(&request).await?;
    success("Article created successfully", article)
}

/// PUT /api/admin/articles/:id - Update an article.
pub async fn update_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateArticleRequest>,
) -> ApiResult<Article> {
    require_uuid(&id)?;

    let article = state.repo.update_article(&id, &request).await?;
    success("Article updated successfully", article)
}

/// DELETE /api/admin/articles/:id - Delete an article.
pub async fn delete_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    require_uuid(&id)?;

    state.repo.delete_article(&id).await?;
    success("Article deleted successfully", ())
}
