//! Activity events and task-comment feed payloads.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Serialized activity event returned by activity endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEventRead {
    pub id: Uuid,
    pub event_type: String,
    pub message: Option<String>,
    pub agent_id: Option<Uuid>,
    pub task_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Denormalized task-comment feed item enriched with task and board
/// fields so the feed renders without extra lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityTaskCommentFeedItemRead {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub message: Option<String>,
    pub agent_id: Option<Uuid>,
    #[serde(default)]
    pub agent_name: Option<String>,
    #[serde(default)]
    pub agent_role: Option<String>,
    pub task_id: Uuid,
    pub task_title: String,
    pub board_id: Uuid,
    pub board_name: String,
}

/// List filter applied to `GET /api/v1/activity`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct ActivityFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<Uuid>,
}
