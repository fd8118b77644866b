//! Tag payloads for create/update/read API operations.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Tag payload returned from read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagRead {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub color: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Payload for creating a tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagCreate {
    pub name: String,
    pub color: Option<String>,
}

/// Payload for partial tag updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// List filter applied to `GET /api/v1/tags`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct TagFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
