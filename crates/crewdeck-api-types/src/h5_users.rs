//! H5 (lightweight web) user account payloads. The console only reads
//! these; account lifecycle is owned by the H5 product surface.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum H5UserStatus {
    Active,
    Disabled,
}

/// H5 user row returned from `GET /api/v1/h5/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct H5UserRead {
    pub id: Uuid,
    pub username: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: H5UserStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// List filter applied to `GET /api/v1/h5/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct H5UserFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<H5UserStatus>,
}
