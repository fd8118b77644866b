//! Marketplace skill-pack operations.

use std::sync::Arc;

use uuid::Uuid;

use crewdeck_api_types::skills::{SkillPackCreate, SkillPackFilter, SkillPackRead, SkillPackUpdate};
use crewdeck_api_types::{ListPage, PageRequest};

use crate::application::api::ConsoleApi;
use crate::application::cached_list;
use crate::application::error::AppError;
use crate::cache::{ListKey, OptimisticListDelete, QueryCache, ResourceKind};

pub struct SkillPackService {
    api: Arc<dyn ConsoleApi>,
    cache: Arc<QueryCache>,
}

impl SkillPackService {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub fn list_key(filter: &SkillPackFilter, page: &PageRequest) -> ListKey {
        ListKey::for_query(ResourceKind::SkillPacks, filter, page)
    }

    pub async fn list(
        &self,
        filter: &SkillPackFilter,
        page: PageRequest,
    ) -> Result<ListPage<SkillPackRead>, AppError> {
        let key = Self::list_key(filter, &page);
        let api = Arc::clone(&self.api);
        let filter = filter.clone();
        cached_list(&self.cache, key, move || async move {
            api.list_skill_packs(&filter, page).await
        })
        .await
    }

    pub async fn get(&self, id: Uuid) -> Result<SkillPackRead, AppError> {
        Ok(self.api.get_skill_pack(id).await?)
    }

    pub async fn create(&self, input: &SkillPackCreate) -> Result<SkillPackRead, AppError> {
        let created = self.api.create_skill_pack(input).await?;
        self.cache.invalidate_lists(ResourceKind::SkillPacks);
        Ok(created)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &SkillPackUpdate,
    ) -> Result<SkillPackRead, AppError> {
        let updated = self.api.update_skill_pack(id, input).await?;
        self.cache.invalidate_lists(ResourceKind::SkillPacks);
        Ok(updated)
    }

    /// Optimistically delete a skill pack from the list view addressed
    /// by `key`.
    pub async fn delete(&self, key: ListKey, id: Uuid) -> Result<(), AppError> {
        let coordinator = OptimisticListDelete::new(
            Arc::clone(&self.cache),
            key,
            |pack: &SkillPackRead| pack.id,
            |id: &Uuid| *id,
        );
        let api = Arc::clone(&self.api);
        coordinator
            .run(id, move |id| async move { api.delete_skill_pack(id).await })
            .await?;
        Ok(())
    }
}
