//! Console API trait describing the backend adapter.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crewdeck_api_types::activity::{
    ActivityEventRead, ActivityFilter, ActivityTaskCommentFeedItemRead,
};
use crewdeck_api_types::agents::{AgentCreate, AgentFilter, AgentRead, AgentUpdate};
use crewdeck_api_types::boards::{
    BoardCreate, BoardFilter, BoardGroupFilter, BoardGroupRead, BoardRead, BoardUpdate,
    BoardWebhookCreate, BoardWebhookRead, BoardWebhookUpdate,
};
use crewdeck_api_types::custom_fields::{
    CustomFieldCreate, CustomFieldFilter, CustomFieldRead, CustomFieldUpdate,
};
use crewdeck_api_types::gateways::{
    GatewayConnectionRead, GatewayCreate, GatewayFilter, GatewayMetricsRead, GatewayRead,
    GatewayUpdate,
};
use crewdeck_api_types::h5_users::{H5UserFilter, H5UserRead};
use crewdeck_api_types::metrics::{DashboardMetricsRead, DashboardRangeKey};
use crewdeck_api_types::skills::{SkillPackCreate, SkillPackFilter, SkillPackRead, SkillPackUpdate};
use crewdeck_api_types::tags::{TagCreate, TagFilter, TagRead, TagUpdate};
use crewdeck_api_types::{ListPage, PageRequest};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("api request failed with status {status}: {detail}")]
    Status { status: u16, detail: String },
    #[error("failed to decode response body: {0}")]
    Decode(String),
    #[error("invalid base url: {0}")]
    BaseUrl(String),
}

impl ApiError {
    pub fn from_transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    /// True for responses the server answered with 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

/// Backend adapter the application services are written against.
///
/// The production implementation is the reqwest client in
/// `infra::http`; tests substitute in-memory fakes.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    // Agents
    async fn list_agents(
        &self,
        filter: &AgentFilter,
        page: PageRequest,
    ) -> Result<ListPage<AgentRead>, ApiError>;
    async fn get_agent(&self, id: Uuid) -> Result<AgentRead, ApiError>;
    async fn create_agent(&self, input: &AgentCreate) -> Result<AgentRead, ApiError>;
    async fn update_agent(&self, id: Uuid, input: &AgentUpdate) -> Result<AgentRead, ApiError>;
    async fn delete_agent(&self, id: Uuid) -> Result<(), ApiError>;

    // Boards
    async fn list_boards(
        &self,
        filter: &BoardFilter,
        page: PageRequest,
    ) -> Result<ListPage<BoardRead>, ApiError>;
    async fn get_board(&self, id: Uuid) -> Result<BoardRead, ApiError>;
    async fn create_board(&self, input: &BoardCreate) -> Result<BoardRead, ApiError>;
    async fn update_board(&self, id: Uuid, input: &BoardUpdate) -> Result<BoardRead, ApiError>;
    async fn delete_board(&self, id: Uuid) -> Result<(), ApiError>;

    // Board groups
    async fn list_board_groups(
        &self,
        filter: &BoardGroupFilter,
        page: PageRequest,
    ) -> Result<ListPage<BoardGroupRead>, ApiError>;

    // Board webhooks
    async fn list_board_webhooks(
        &self,
        board_id: Uuid,
        page: PageRequest,
    ) -> Result<ListPage<BoardWebhookRead>, ApiError>;
    async fn create_board_webhook(
        &self,
        board_id: Uuid,
        input: &BoardWebhookCreate,
    ) -> Result<BoardWebhookRead, ApiError>;
    async fn update_board_webhook(
        &self,
        board_id: Uuid,
        webhook_id: Uuid,
        input: &BoardWebhookUpdate,
    ) -> Result<BoardWebhookRead, ApiError>;
    async fn delete_board_webhook(&self, board_id: Uuid, webhook_id: Uuid)
    -> Result<(), ApiError>;

    // Gateways
    async fn list_gateways(
        &self,
        filter: &GatewayFilter,
        page: PageRequest,
    ) -> Result<ListPage<GatewayRead>, ApiError>;
    async fn get_gateway(&self, id: Uuid) -> Result<GatewayRead, ApiError>;
    async fn create_gateway(&self, input: &GatewayCreate) -> Result<GatewayRead, ApiError>;
    async fn update_gateway(&self, id: Uuid, input: &GatewayUpdate)
    -> Result<GatewayRead, ApiError>;
    async fn delete_gateway(&self, id: Uuid) -> Result<(), ApiError>;
    async fn list_gateway_connections(
        &self,
        gateway_id: Uuid,
        page: PageRequest,
    ) -> Result<ListPage<GatewayConnectionRead>, ApiError>;
    async fn gateway_metrics(&self, gateway_id: Uuid) -> Result<GatewayMetricsRead, ApiError>;

    // Tags
    async fn list_tags(
        &self,
        filter: &TagFilter,
        page: PageRequest,
    ) -> Result<ListPage<TagRead>, ApiError>;
    async fn create_tag(&self, input: &TagCreate) -> Result<TagRead, ApiError>;
    async fn update_tag(&self, id: Uuid, input: &TagUpdate) -> Result<TagRead, ApiError>;
    async fn delete_tag(&self, id: Uuid) -> Result<(), ApiError>;

    // Custom field definitions
    async fn list_custom_fields(
        &self,
        filter: &CustomFieldFilter,
        page: PageRequest,
    ) -> Result<ListPage<CustomFieldRead>, ApiError>;
    async fn get_custom_field(&self, id: Uuid) -> Result<CustomFieldRead, ApiError>;
    async fn create_custom_field(
        &self,
        input: &CustomFieldCreate,
    ) -> Result<CustomFieldRead, ApiError>;
    async fn update_custom_field(
        &self,
        id: Uuid,
        input: &CustomFieldUpdate,
    ) -> Result<CustomFieldRead, ApiError>;
    async fn delete_custom_field(&self, id: Uuid) -> Result<(), ApiError>;

    // Skill packs
    async fn list_skill_packs(
        &self,
        filter: &SkillPackFilter,
        page: PageRequest,
    ) -> Result<ListPage<SkillPackRead>, ApiError>;
    async fn get_skill_pack(&self, id: Uuid) -> Result<SkillPackRead, ApiError>;
    async fn create_skill_pack(&self, input: &SkillPackCreate)
    -> Result<SkillPackRead, ApiError>;
    async fn update_skill_pack(
        &self,
        id: Uuid,
        input: &SkillPackUpdate,
    ) -> Result<SkillPackRead, ApiError>;
    async fn delete_skill_pack(&self, id: Uuid) -> Result<(), ApiError>;

    // H5 users (read-only from the console)
    async fn list_h5_users(
        &self,
        filter: &H5UserFilter,
        page: PageRequest,
    ) -> Result<ListPage<H5UserRead>, ApiError>;

    // Activity feed
    async fn list_activity_events(
        &self,
        filter: &ActivityFilter,
        page: PageRequest,
    ) -> Result<ListPage<ActivityEventRead>, ApiError>;
    async fn list_activity_comment_feed(
        &self,
        page: PageRequest,
    ) -> Result<ListPage<ActivityTaskCommentFeedItemRead>, ApiError>;

    // Dashboard metrics
    async fn dashboard_metrics(
        &self,
        range: DashboardRangeKey,
    ) -> Result<DashboardMetricsRead, ApiError>;
}
