//! Activity feed queries for the console landing page.

use std::sync::Arc;

use crewdeck_api_types::activity::{
    ActivityEventRead, ActivityFilter, ActivityTaskCommentFeedItemRead,
};
use crewdeck_api_types::{ListPage, PageRequest};

use crate::application::api::ConsoleApi;
use crate::application::cached_list;
use crate::application::error::AppError;
use crate::cache::{ListKey, QueryCache, ResourceKind};

pub struct ActivityService {
    api: Arc<dyn ConsoleApi>,
    cache: Arc<QueryCache>,
}

impl ActivityService {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    pub async fn list(
        &self,
        filter: &ActivityFilter,
        page: PageRequest,
    ) -> Result<ListPage<ActivityEventRead>, AppError> {
        let key = ListKey::for_query(ResourceKind::ActivityEvents, filter, &page);
        let api = Arc::clone(&self.api);
        let filter = filter.clone();
        cached_list(&self.cache, key, move || async move {
            api.list_activity_events(&filter, page).await
        })
        .await
    }

    /// Task-comment feed for the dashboard sidebar. Fetched fresh on
    /// every call; the feed changes too often for page caching to help.
    pub async fn comment_feed(
        &self,
        page: PageRequest,
    ) -> Result<ListPage<ActivityTaskCommentFeedItemRead>, AppError> {
        Ok(self.api.list_activity_comment_feed(page).await?)
    }
}
