//! Tag management operations.

use std::sync::Arc;

use uuid::Uuid;

use crewdeck_api_types::tags::{TagCreate, TagFilter, TagRead, TagUpdate};
use crewdeck_api_types::{ListPage, PageRequest};

use crate::application::api::ConsoleApi;
use crate::application::cached_list;
use crate::application::error::AppError;
use crate::cache::{ListKey, OptimisticListDelete, QueryCache, ResourceKind};

pub struct TagService {
    api: Arc<dyn ConsoleApi>,
    cache: Arc<QueryCache>,
}

impl TagService {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub fn list_key(filter: &TagFilter, page: &PageRequest) -> ListKey {
        ListKey::for_query(ResourceKind::Tags, filter, page)
    }

    pub async fn list(
        &self,
        filter: &TagFilter,
        page: PageRequest,
    ) -> Result<ListPage<TagRead>, AppError> {
        let key = Self::list_key(filter, &page);
        let api = Arc::clone(&self.api);
        let filter = filter.clone();
        cached_list(&self.cache, key, move || async move {
            api.list_tags(&filter, page).await
        })
        .await
    }

    pub async fn create(&self, input: &TagCreate) -> Result<TagRead, AppError> {
        let created = self.api.create_tag(input).await?;
        self.cache.invalidate_lists(ResourceKind::Tags);
        Ok(created)
    }

    pub async fn update(&self, id: Uuid, input: &TagUpdate) -> Result<TagRead, AppError> {
        let updated = self.api.update_tag(id, input).await?;
        self.cache.invalidate_lists(ResourceKind::Tags);
        Ok(updated)
    }

    /// Optimistically delete a tag from the list view addressed by `key`.
    pub async fn delete(&self, key: ListKey, id: Uuid) -> Result<(), AppError> {
        let coordinator = OptimisticListDelete::new(
            Arc::clone(&self.cache),
            key,
            |tag: &TagRead| tag.id,
            |id: &Uuid| *id,
        );
        let api = Arc::clone(&self.api);
        coordinator
            .run(id, move |id| async move { api.delete_tag(id).await })
            .await?;
        Ok(())
    }
}
