//! Reqwest adapter for the console backend API.

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
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

use crate::application::api::{ApiError, ConsoleApi};
use crate::config::ApiSettings;

/// Error envelope the backend returns for non-2xx responses.
#[derive(Debug, serde::Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP client bound to one backend deployment.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ConsoleClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let base_url = settings
            .base_url
            .join("/")
            .map_err(|err| ApiError::BaseUrl(err.to_string()))?;
        let http = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(settings.request_timeout)
            .build()
            .map_err(ApiError::from_transport)?;
        Ok(Self {
            http,
            base_url,
            token: settings.token.clone(),
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("crewdeck/", env!("CARGO_PKG_VERSION"))
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|err| ApiError::BaseUrl(err.to_string()))
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let req = self.http.request(method, url);
        match self.token.as_deref() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::from_transport)?;
        if !status.is_success() {
            return Err(status_error(status, &bytes));
        }
        serde_json::from_slice(&bytes).map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .request(Method::GET, self.endpoint(path)?)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::decode(response).await
    }

    async fn get_list<T, F>(
        &self,
        path: &str,
        filter: &F,
        page: PageRequest,
    ) -> Result<ListPage<T>, ApiError>
    where
        T: DeserializeOwned,
        F: Serialize + Sync,
    {
        let response = self
            .request(Method::GET, self.endpoint(path)?)
            .query(&page)
            .query(filter)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::decode(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::decode(response).await
    }

    async fn patch_json<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::PATCH, self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::decode(response).await
    }

    async fn delete_unit(&self, path: &str) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, self.endpoint(path)?)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        let status = response.status();
        if !status.is_success() {
            let bytes = response.bytes().await.map_err(ApiError::from_transport)?;
            return Err(status_error(status, &bytes));
        }
        Ok(())
    }
}

fn status_error(status: StatusCode, bytes: &[u8]) -> ApiError {
    let detail = serde_json::from_slice::<ErrorBody>(bytes)
        .map(|body| body.detail)
        .unwrap_or_else(|_| String::from_utf8_lossy(bytes).into_owned());
    ApiError::Status {
        status: status.as_u16(),
        detail,
    }
}

#[async_trait]
impl ConsoleApi for ConsoleClient {
    async fn list_agents(
        &self,
        filter: &AgentFilter,
        page: PageRequest,
    ) -> Result<ListPage<AgentRead>, ApiError> {
        self.get_list("api/v1/agents", filter, page).await
    }

    async fn get_agent(&self, id: Uuid) -> Result<AgentRead, ApiError> {
        self.get_json(&format!("api/v1/agents/{id}")).await
    }

    async fn create_agent(&self, input: &AgentCreate) -> Result<AgentRead, ApiError> {
        self.post_json("api/v1/agents", input).await
    }

    async fn update_agent(&self, id: Uuid, input: &AgentUpdate) -> Result<AgentRead, ApiError> {
        self.patch_json(&format!("api/v1/agents/{id}"), input).await
    }

    async fn delete_agent(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_unit(&format!("api/v1/agents/{id}")).await
    }

    async fn list_boards(
        &self,
        filter: &BoardFilter,
        page: PageRequest,
    ) -> Result<ListPage<BoardRead>, ApiError> {
        self.get_list("api/v1/boards", filter, page).await
    }

    async fn get_board(&self, id: Uuid) -> Result<BoardRead, ApiError> {
        self.get_json(&format!("api/v1/boards/{id}")).await
    }

    async fn create_board(&self, input: &BoardCreate) -> Result<BoardRead, ApiError> {
        self.post_json("api/v1/boards", input).await
    }

    async fn update_board(&self, id: Uuid, input: &BoardUpdate) -> Result<BoardRead, ApiError> {
        self.patch_json(&format!("api/v1/boards/{id}"), input).await
    }

    async fn delete_board(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_unit(&format!("api/v1/boards/{id}")).await
    }

    async fn list_board_groups(
        &self,
        filter: &BoardGroupFilter,
        page: PageRequest,
    ) -> Result<ListPage<BoardGroupRead>, ApiError> {
        self.get_list("api/v1/board-groups", filter, page).await
    }

    async fn list_board_webhooks(
        &self,
        board_id: Uuid,
        page: PageRequest,
    ) -> Result<ListPage<BoardWebhookRead>, ApiError> {
        let response = self
            .request(
                Method::GET,
                self.endpoint(&format!("api/v1/boards/{board_id}/webhooks"))?,
            )
            .query(&page)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::decode(response).await
    }

    async fn create_board_webhook(
        &self,
        board_id: Uuid,
        input: &BoardWebhookCreate,
    ) -> Result<BoardWebhookRead, ApiError> {
        self.post_json(&format!("api/v1/boards/{board_id}/webhooks"), input)
            .await
    }

    async fn update_board_webhook(
        &self,
        board_id: Uuid,
        webhook_id: Uuid,
        input: &BoardWebhookUpdate,
    ) -> Result<BoardWebhookRead, ApiError> {
        self.patch_json(
            &format!("api/v1/boards/{board_id}/webhooks/{webhook_id}"),
            input,
        )
        .await
    }

    async fn delete_board_webhook(
        &self,
        board_id: Uuid,
        webhook_id: Uuid,
    ) -> Result<(), ApiError> {
        self.delete_unit(&format!("api/v1/boards/{board_id}/webhooks/{webhook_id}"))
            .await
    }

    async fn list_gateways(
        &self,
        filter: &GatewayFilter,
        page: PageRequest,
    ) -> Result<ListPage<GatewayRead>, ApiError> {
        self.get_list("api/v1/gateways", filter, page).await
    }

    async fn get_gateway(&self, id: Uuid) -> Result<GatewayRead, ApiError> {
        self.get_json(&format!("api/v1/gateways/{id}")).await
    }

    async fn create_gateway(&self, input: &GatewayCreate) -> Result<GatewayRead, ApiError> {
        self.post_json("api/v1/gateways", input).await
    }

    async fn update_gateway(
        &self,
        id: Uuid,
        input: &GatewayUpdate,
    ) -> Result<GatewayRead, ApiError> {
        self.patch_json(&format!("api/v1/gateways/{id}"), input)
            .await
    }

    async fn delete_gateway(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_unit(&format!("api/v1/gateways/{id}")).await
    }

    async fn list_gateway_connections(
        &self,
        gateway_id: Uuid,
        page: PageRequest,
    ) -> Result<ListPage<GatewayConnectionRead>, ApiError> {
        let response = self
            .request(
                Method::GET,
                self.endpoint(&format!("api/v1/gateways/{gateway_id}/connections"))?,
            )
            .query(&page)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::decode(response).await
    }

    async fn gateway_metrics(&self, gateway_id: Uuid) -> Result<GatewayMetricsRead, ApiError> {
        self.get_json(&format!("api/v1/gateways/{gateway_id}/metrics"))
            .await
    }

    async fn list_tags(
        &self,
        filter: &TagFilter,
        page: PageRequest,
    ) -> Result<ListPage<TagRead>, ApiError> {
        self.get_list("api/v1/tags", filter, page).await
    }

    async fn create_tag(&self, input: &TagCreate) -> Result<TagRead, ApiError> {
        self.post_json("api/v1/tags", input).await
    }

    async fn update_tag(&self, id: Uuid, input: &TagUpdate) -> Result<TagRead, ApiError> {
        self.patch_json(&format!("api/v1/tags/{id}"), input).await
    }

    async fn delete_tag(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_unit(&format!("api/v1/tags/{id}")).await
    }

    async fn list_custom_fields(
        &self,
        filter: &CustomFieldFilter,
        page: PageRequest,
    ) -> Result<ListPage<CustomFieldRead>, ApiError> {
        self.get_list("api/v1/custom-fields", filter, page).await
    }

    async fn get_custom_field(&self, id: Uuid) -> Result<CustomFieldRead, ApiError> {
        self.get_json(&format!("api/v1/custom-fields/{id}")).await
    }

    async fn create_custom_field(
        &self,
        input: &CustomFieldCreate,
    ) -> Result<CustomFieldRead, ApiError> {
        self.post_json("api/v1/custom-fields", input).await
    }

    async fn update_custom_field(
        &self,
        id: Uuid,
        input: &CustomFieldUpdate,
    ) -> Result<CustomFieldRead, ApiError> {
        self.patch_json(&format!("api/v1/custom-fields/{id}"), input)
            .await
    }

    async fn delete_custom_field(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_unit(&format!("api/v1/custom-fields/{id}")).await
    }

    async fn list_skill_packs(
        &self,
        filter: &SkillPackFilter,
        page: PageRequest,
    ) -> Result<ListPage<SkillPackRead>, ApiError> {
        self.get_list("api/v1/skills/packs", filter, page).await
    }

    async fn get_skill_pack(&self, id: Uuid) -> Result<SkillPackRead, ApiError> {
        self.get_json(&format!("api/v1/skills/packs/{id}")).await
    }

    async fn create_skill_pack(&self, input: &SkillPackCreate) -> Result<SkillPackRead, ApiError> {
        self.post_json("api/v1/skills/packs", input).await
    }

    async fn update_skill_pack(
        &self,
        id: Uuid,
        input: &SkillPackUpdate,
    ) -> Result<SkillPackRead, ApiError> {
        self.patch_json(&format!("api/v1/skills/packs/{id}"), input)
            .await
    }

    async fn delete_skill_pack(&self, id: Uuid) -> Result<(), ApiError> {
        self.delete_unit(&format!("api/v1/skills/packs/{id}")).await
    }

    async fn list_h5_users(
        &self,
        filter: &H5UserFilter,
        page: PageRequest,
    ) -> Result<ListPage<H5UserRead>, ApiError> {
        self.get_list("api/v1/h5/users", filter, page).await
    }

    async fn list_activity_events(
        &self,
        filter: &ActivityFilter,
        page: PageRequest,
    ) -> Result<ListPage<ActivityEventRead>, ApiError> {
        self.get_list("api/v1/activity", filter, page).await
    }

    async fn list_activity_comment_feed(
        &self,
        page: PageRequest,
    ) -> Result<ListPage<ActivityTaskCommentFeedItemRead>, ApiError> {
        let response = self
            .request(Method::GET, self.endpoint("api/v1/activity/feed")?)
            .query(&page)
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::decode(response).await
    }

    async fn dashboard_metrics(
        &self,
        range: DashboardRangeKey,
    ) -> Result<DashboardMetricsRead, ApiError> {
        let response = self
            .request(Method::GET, self.endpoint("api/v1/metrics/dashboard")?)
            .query(&[("range", range)])
            .send()
            .await
            .map_err(ApiError::from_transport)?;
        Self::decode(response).await
    }
}
