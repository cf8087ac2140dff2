//! Audio message model: recorded sermons and teachings.

use serde::{Deserialize, Serialize};

/// A recorded audio message. `category` is stored denormalized as a plain
/// string; deleting a Category does not rewrite messages tagged with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioMessage {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub audio_url: String,
    pub speaker: String,
    /// Date the message was delivered, ISO 8601 date string
    pub date: String,
    /// Playback length as displayed, e.g. "42:17"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Metadata fields of the multipart create request. The audio file and
/// thumbnail arrive as separate multipart parts, not in this struct.
#[derive(Debug, Clone, Default)]
pub struct CreateAudioMessageFields {
    pub title: String,
    pub description: Option<String>,
    pub speaker: String,
    pub date: String,
    pub duration: Option<String>,
    pub category: String,
}

/// Request body for updating an existing audio message (JSON, metadata only).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAudioMessageRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub audio_url: Option<String>,
    #[serde(default)]
    pub speaker: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
}
