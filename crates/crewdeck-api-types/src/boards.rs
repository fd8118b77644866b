//! Board, board-group, and board-webhook payloads.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Board payload returned from read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardRead {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub group_id: Option<Uuid>,
    pub gateway_id: Option<Uuid>,
    /// Agent that receives webhook deliveries when a webhook has no
    /// explicit agent of its own.
    pub lead_agent_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Payload for creating a board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardCreate {
    pub name: String,
    pub description: Option<String>,
    pub goal: Option<String>,
    pub group_id: Option<Uuid>,
    pub gateway_id: Option<Uuid>,
}

/// Payload for partial board updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lead_agent_id: Option<Uuid>,
}

/// List filter applied to `GET /api/v1/boards`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BoardFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<Uuid>,
}

/// Board-group payload returned from read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardGroupRead {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// List filter applied to `GET /api/v1/board-groups`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct BoardGroupFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Webhook payload returned from board-webhook read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardWebhookRead {
    pub id: Uuid,
    pub board_id: Uuid,
    pub description: Option<String>,
    /// `None` routes deliveries to the board's lead agent.
    pub agent_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Payload for creating a board webhook.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardWebhookCreate {
    pub description: Option<String>,
    pub agent_id: Option<Uuid>,
}

/// Payload for partial board-webhook updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoardWebhookUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<Uuid>,
}
