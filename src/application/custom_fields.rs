//! Task custom-field definition operations.

use std::sync::Arc;

use uuid::Uuid;

use crewdeck_api_types::custom_fields::{
    CustomFieldCreate, CustomFieldFilter, CustomFieldRead, CustomFieldUpdate,
};
use crewdeck_api_types::{ListPage, PageRequest};

use crate::application::api::ConsoleApi;
use crate::application::cached_list;
use crate::application::error::AppError;
use crate::cache::{ListKey, OptimisticListDelete, QueryCache, ResourceKind};

pub struct CustomFieldService {
    api: Arc<dyn ConsoleApi>,
    cache: Arc<QueryCache>,
}

impl CustomFieldService {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub fn list_key(filter: &CustomFieldFilter, page: &PageRequest) -> ListKey {
        ListKey::for_query(ResourceKind::CustomFields, filter, page)
    }

    pub async fn list(
        &self,
        filter: &CustomFieldFilter,
        page: PageRequest,
    ) -> Result<ListPage<CustomFieldRead>, AppError> {
        let key = Self::list_key(filter, &page);
        let api = Arc::clone(&self.api);
        let filter = filter.clone();
        cached_list(&self.cache, key, move || async move {
            api.list_custom_fields(&filter, page).await
        })
        .await
    }

    pub async fn get(&self, id: Uuid) -> Result<CustomFieldRead, AppError> {
        Ok(self.api.get_custom_field(id).await?)
    }

    pub async fn create(&self, input: &CustomFieldCreate) -> Result<CustomFieldRead, AppError> {
        let created = self.api.create_custom_field(input).await?;
        self.cache.invalidate_lists(ResourceKind::CustomFields);
        Ok(created)
    }

    pub async fn update(
        &self,
        id: Uuid,
        input: &CustomFieldUpdate,
    ) -> Result<CustomFieldRead, AppError> {
        let updated = self.api.update_custom_field(id, input).await?;
        self.cache.invalidate_lists(ResourceKind::CustomFields);
        Ok(updated)
    }

    /// Optimistically delete a field definition from the list view
    /// addressed by `key`.
    pub async fn delete(&self, key: ListKey, id: Uuid) -> Result<(), AppError> {
        let coordinator = OptimisticListDelete::new(
            Arc::clone(&self.cache),
            key,
            |field: &CustomFieldRead| field.id,
            |id: &Uuid| *id,
        );
        let api = Arc::clone(&self.api);
        coordinator
            .run(id, move |id| async move { api.delete_custom_field(id).await })
            .await?;
        Ok(())
    }
}
