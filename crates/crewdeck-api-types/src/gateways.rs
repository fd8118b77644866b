//! Gateway payloads: connection endpoints to runtime workers.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Health state reported for a gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayStatus {
    Online,
    Pending,
    Offline,
    Error,
}

/// Gateway payload returned from read endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayRead {
    pub id: Uuid,
    pub organization_id: Uuid,
    pub name: String,
    pub url: Option<String>,
    pub status: GatewayStatus,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_seen_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Payload for creating a gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayCreate {
    pub name: String,
    pub url: Option<String>,
}

/// Payload for partial gateway updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GatewayUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// List filter applied to `GET /api/v1/gateways`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct GatewayFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GatewayStatus>,
}

/// One live worker connection held by a gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConnectionRead {
    pub id: Uuid,
    pub gateway_id: Uuid,
    pub remote_addr: String,
    pub client_name: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub connected_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_heartbeat_at: Option<OffsetDateTime>,
}

/// Rolling traffic counters rendered on the gateway metrics card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayMetricsRead {
    pub gateway_id: Uuid,
    pub active_connections: u32,
    pub messages_in: u64,
    pub messages_out: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub window_started_at: OffsetDateTime,
}
