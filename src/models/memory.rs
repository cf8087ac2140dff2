//! Memory model: a gallery photo tied to an Activity.

use serde::{Deserialize, Serialize};

/// A gallery photo. `activity_id` is a soft reference to an Activity;
/// deleting the activity cascade-deletes its memories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    pub id: String,
    pub image_url: String,
    /// Pixel dimensions, supplied by the uploader for lightbox layout
    pub height: i64,
    pub width: i64,
    /// Image format tag, e.g. "jpg"
    pub img_type: String,
    pub activity_id: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new memory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoryRequest {
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub height: i64,
    #[serde(default)]
    pub width: i64,
    #[serde(default)]
    pub img_type: String,
    #[serde(default)]
    pub activity_id: String,
}

/// Request body for updating an existing memory.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMemoryRequest {
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub height: Option<i64>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub img_type: Option<String>,
    #[serde(default)]
    pub activity_id: Option<String>,
}
