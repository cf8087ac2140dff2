//! Article model for the public blog section.

use serde::{Deserialize, Serialize};

/// A published article. `author_id` is a soft reference to an Author record;
/// nothing enforces that the referenced author exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub author_id: String,
    /// Article body text
    pub text: String,
    /// Publication date shown on the site, ISO 8601 date string
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_image: Option<String>,
    /// Estimated reading time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new article.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArticleRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub author_id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub display_image: Option<String>,
    #[serde(default)]
    pub read_time: Option<i64>,
}

/// Request body for updating an existing article.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArticleRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub display_image: Option<String>,
    #[serde(default)]
    pub read_time: Option<i64>,
}
