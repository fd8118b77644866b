//! H5 user account listing. The console reads these accounts but never
//! mutates them.

use std::sync::Arc;

use crewdeck_api_types::h5_users::{H5UserFilter, H5UserRead};
use crewdeck_api_types::{ListPage, PageRequest};

use crate::application::api::ConsoleApi;
use crate::application::cached_list;
use crate::application::error::AppError;
use crate::cache::{ListKey, QueryCache, ResourceKind};

pub struct H5UserService {
    api: Arc<dyn ConsoleApi>,
    cache: Arc<QueryCache>,
}

impl H5UserService {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub async fn list(
        &self,
        filter: &H5UserFilter,
        page: PageRequest,
    ) -> Result<ListPage<H5UserRead>, AppError> {
        let key = ListKey::for_query(ResourceKind::H5Users, filter, &page);
        let api = Arc::clone(&self.api);
        let filter = filter.clone();
        cached_list(&self.cache, key, move || async move {
            api.list_h5_users(&filter, page).await
        })
        .await
    }
}
