//! Activity model: a church event that Memories (gallery photos) attach to.

use serde::{Deserialize, Serialize};

/// A church activity or event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    /// Date the activity took place, ISO 8601 date string
    pub date: String,
    pub description: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new activity. Required fields default to
/// empty so a missing key surfaces as a validation error, not a parse error.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

/// Request body for updating an existing activity.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateActivityRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
