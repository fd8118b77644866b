//! Task custom-field definition payloads.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Value shape accepted by a custom field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomFieldType {
    Text,
    Number,
    Date,
    Select,
    Checkbox,
}

/// Custom-field definition returned from read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldRead {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    /// Stable key used on task payloads; immutable after creation.
    pub field_key: String,
    pub field_type: CustomFieldType,
    /// Choices for `Select` fields, absent otherwise.
    pub options: Option<Vec<String>>,
    /// Boards the field is attached to; `None` means all boards.
    pub board_ids: Option<Vec<Uuid>>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Payload for creating a custom-field definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldCreate {
    pub name: String,
    pub field_key: String,
    pub field_type: CustomFieldType,
    pub options: Option<Vec<String>>,
    pub board_ids: Option<Vec<Uuid>>,
}

/// Payload for partial custom-field updates. `field_key` and
/// `field_type` are fixed once created.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFieldUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_ids: Option<Vec<Uuid>>,
}

/// List filter applied to `GET /api/v1/custom-fields`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct CustomFieldFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
