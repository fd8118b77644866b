//! Agent roster operations.

use std::sync::Arc;

use uuid::Uuid;

use crewdeck_api_types::agents::{AgentCreate, AgentFilter, AgentRead, AgentUpdate};
use crewdeck_api_types::{ListPage, PageRequest};

use crate::application::api::ConsoleApi;
use crate::application::cached_list;
use crate::application::error::AppError;
use crate::cache::{ListKey, OptimisticListDelete, QueryCache, QueryKey, ResourceKind};

pub struct AgentService {
    api: Arc<dyn ConsoleApi>,
    cache: Arc<QueryCache>,
}

impl AgentService {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// Cache key for an agent list view; callers hold on to this to
    /// address the same page when deleting from it.
    pub fn list_key(filter: &AgentFilter, page: &PageRequest) -> ListKey {
        ListKey::for_query(ResourceKind::Agents, filter, page)
    }

    pub async fn list(
        &self,
        filter: &AgentFilter,
        page: PageRequest,
    ) -> Result<ListPage<AgentRead>, AppError> {
        let key = Self::list_key(filter, &page);
        let api = Arc::clone(&self.api);
        let filter = filter.clone();
        cached_list(&self.cache, key, move || async move {
            api.list_agents(&filter, page).await
        })
        .await
    }

    pub async fn get(&self, id: Uuid) -> Result<AgentRead, AppError> {
        Ok(self.api.get_agent(id).await?)
    }

    pub async fn create(&self, input: &AgentCreate) -> Result<AgentRead, AppError> {
        let created = self.api.create_agent(input).await?;
        self.cache.invalidate_lists(ResourceKind::Agents);
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, input: &AgentUpdate) -> Result<AgentRead, AppError> {
        let updated = self.api.update_agent(id, input).await?;
        self.cache.invalidate_lists(ResourceKind::Agents);
        Ok(updated)
    }

    /// Optimistically delete an agent from the list view addressed by
    /// `key`. The dashboard snapshot is flagged stale on confirmation
    /// since agent counts feed its series.
    pub async fn delete(&self, key: ListKey, id: Uuid) -> Result<(), AppError> {
        let coordinator = OptimisticListDelete::new(
            Arc::clone(&self.cache),
            key,
            |agent: &AgentRead| agent.id,
            |id: &Uuid| *id,
        )
        .invalidate(QueryKey::DashboardMetrics);
        let api = Arc::clone(&self.api);
        coordinator
            .run(id, move |id| async move { api.delete_agent(id).await })
            .await?;
        Ok(())
    }
}
