//! Marketplace skill-pack payloads.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Skill pack installed from a git source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillPackRead {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Repository URL the pack is pulled from.
    pub source_url: String,
    pub branch: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Payload for registering a skill pack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillPackCreate {
    pub name: String,
    pub description: Option<String>,
    pub source_url: String,
    pub branch: Option<String>,
}

/// Payload for partial skill-pack updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillPackUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// List filter applied to `GET /api/v1/skills/packs`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct SkillPackFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}
