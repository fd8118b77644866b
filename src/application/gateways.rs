//! Gateway operations: endpoints, live connections, traffic cards.

use std::sync::Arc;

use uuid::Uuid;

use crewdeck_api_types::gateways::{
    GatewayConnectionRead, GatewayCreate, GatewayFilter, GatewayMetricsRead, GatewayRead,
    GatewayUpdate,
};
use crewdeck_api_types::{ListPage, PageRequest};

use crate::application::api::ConsoleApi;
use crate::application::cached_list;
use crate::application::error::AppError;
use crate::cache::{
    ListKey, OptimisticListDelete, QueryCache, QueryKey, ResourceKind, StaleMarker,
};

pub struct GatewayService {
    api: Arc<dyn ConsoleApi>,
    cache: Arc<QueryCache>,
}

impl GatewayService {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub fn list_key(filter: &GatewayFilter, page: &PageRequest) -> ListKey {
        ListKey::for_query(ResourceKind::Gateways, filter, page)
    }

    pub async fn list(
        &self,
        filter: &GatewayFilter,
        page: PageRequest,
    ) -> Result<ListPage<GatewayRead>, AppError> {
        let key = Self::list_key(filter, &page);
        let api = Arc::clone(&self.api);
        let filter = filter.clone();
        cached_list(&self.cache, key, move || async move {
            api.list_gateways(&filter, page).await
        })
        .await
    }

    pub async fn get(&self, id: Uuid) -> Result<GatewayRead, AppError> {
        Ok(self.api.get_gateway(id).await?)
    }

    pub async fn create(&self, input: &GatewayCreate) -> Result<GatewayRead, AppError> {
        let created = self.api.create_gateway(input).await?;
        self.cache.invalidate_lists(ResourceKind::Gateways);
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, input: &GatewayUpdate) -> Result<GatewayRead, AppError> {
        let updated = self.api.update_gateway(id, input).await?;
        self.cache.invalidate_lists(ResourceKind::Gateways);
        Ok(updated)
    }

    /// Optimistically delete a gateway from the list view addressed by
    /// `key`. Its traffic card can no longer be trusted afterwards.
    pub async fn delete(&self, key: ListKey, id: Uuid) -> Result<(), AppError> {
        let coordinator = OptimisticListDelete::new(
            Arc::clone(&self.cache),
            key,
            |gateway: &GatewayRead| gateway.id,
            |id: &Uuid| *id,
        )
        .invalidate(QueryKey::GatewayMetrics(id))
        .invalidate(QueryKey::DashboardMetrics);
        let api = Arc::clone(&self.api);
        coordinator
            .run(id, move |id| async move { api.delete_gateway(id).await })
            .await?;
        Ok(())
    }

    pub async fn list_connections(
        &self,
        gateway_id: Uuid,
        page: PageRequest,
    ) -> Result<ListPage<GatewayConnectionRead>, AppError> {
        let key = ListKey::for_query(ResourceKind::GatewayConnections, &gateway_id, &page);
        let api = Arc::clone(&self.api);
        cached_list(&self.cache, key, move || async move {
            api.list_gateway_connections(gateway_id, page).await
        })
        .await
    }

    /// Traffic card for one gateway, served from cache until flagged
    /// stale.
    pub async fn metrics_card(&self, gateway_id: Uuid) -> Result<GatewayMetricsRead, AppError> {
        let query_key = QueryKey::GatewayMetrics(gateway_id);
        if !self.cache.is_stale(&query_key) {
            if let Some(card) = self.cache.get_gateway_metrics(gateway_id) {
                return Ok(card);
            }
        }

        let card = self.api.gateway_metrics(gateway_id).await?;
        self.cache.set_gateway_metrics(card.clone());
        self.cache.clear_stale(&query_key);
        Ok(card)
    }
}
