//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.
//! Every response uses the same envelope: `{status, message, data}` on
//! success, `{status, message}` on error, with an optional `pagination`
//! block on paged lists.

mod activities;
mod articles;
mod audio_messages;
mod auth;
mod authors;
mod categories;
mod coordinators;
mod memories;
mod messages;
mod pastors;
mod uploads;

pub use activities::*;
pub use articles::*;
pub use audio_messages::*;
pub use auth::*;
pub use authors::*;
pub use categories::*;
pub use coordinators::*;
pub use memories::*;
pub use messages::*;
pub use pastors::*;
pub use uploads::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Success response envelope.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T: Serialize> {
    pub status: String,
    pub message: String,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "Success".to_string(),
            message: message.into(),
            data,
            pagination: None,
        }
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = Some(pagination);
        self
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// Create a successful API response.
pub fn success<T: Serialize>(message: impl Into<String>, data: T) -> ApiResult<T> {
    Ok(ApiResponse::new(message, data))
}

/// Reject path ids that are not UUIDs before touching the database.
pub(crate) fn require_uuid(id: &str) -> Result<(), AppError> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| AppError::Validation(format!("Invalid id: {}", id)))
}

/// Pagination block attached to paged list responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + limit - 1) / limit
        };
        Self {
            current_page: page,
            total_pages,
            total_items,
            items_per_page: limit,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }
}

/// Query parameters for paged list endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    /// Apply defaults (page 1, limit 10) and bounds (limit 1..=100).
    pub fn resolve(&self) -> Result<(i64, i64), AppError> {
        let page = self.page.unwrap_or(1);
        let limit = self.limit.unwrap_or(10);

        if page < 1 {
            return Err(AppError::Validation(
                "Page must be a positive integer".to_string(),
            ));
        }
        if !(1..=100).contains(&limit) {
            return Err(AppError::Validation(
                "Limit must be between 1 and 100".to_string(),
            ));
        }

        Ok((page, limit))
    }
}
