//! Message model: written messages from coordinators to the congregation.

use serde::{Deserialize, Serialize};

/// A coordinator message. Unpublished messages are invisible on the public
/// surface; `coordinator_id` is a soft reference to a Coordinator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: String,
    pub title: String,
    pub content: String,
    pub coordinator_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_published: Option<String>,
    pub is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Request body for creating a new message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub coordinator_id: String,
    #[serde(default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub excerpt: Option<String>,
}

/// Request body for updating an existing message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMessageRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub coordinator_id: Option<String>,
    #[serde(default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub is_published: Option<bool>,
    #[serde(default)]
    pub excerpt: Option<String>,
}
