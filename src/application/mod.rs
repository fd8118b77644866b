//! Application services binding the console API to the query cache.
//!
//! Each service mirrors one console page family: cached list reads,
//! straight-through detail reads, list invalidation on create/update,
//! and optimistic deletes through the cache coordinator.

use std::future::Future;
use std::sync::Arc;

use crewdeck_api_types::ListPage;

use crate::application::api::{ApiError, ConsoleApi};
use crate::application::error::AppError;
use crate::cache::{CacheConfig, ListKey, ListStore, QueryCache, QueryKey, StaleMarker};
use crate::config::Settings;
use crate::infra::http::ConsoleClient;

pub mod activity;
pub mod agents;
pub mod api;
pub mod boards;
pub mod custom_fields;
pub mod error;
pub mod gateways;
pub mod h5_users;
pub mod metrics;
pub mod skills;
pub mod tags;

/// Serve a cached page unless the key is stale or missing; otherwise
/// fetch, store, and clear the stale flag.
pub(crate) async fn cached_list<T, F, Fut>(
    cache: &QueryCache,
    key: ListKey,
    fetch: F,
) -> Result<ListPage<T>, AppError>
where
    T: Clone,
    QueryCache: ListStore<T>,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<ListPage<T>, ApiError>>,
{
    let query_key = QueryKey::List(key);
    if !cache.is_stale(&query_key) {
        if let Some(page) = ListStore::<T>::get_page(cache, &key) {
            return Ok(page);
        }
    }

    let page = fetch().await?;
    ListStore::<T>::put_page(cache, key, page.clone());
    cache.clear_stale(&query_key);
    Ok(page)
}

/// One handle per console page family, sharing a single API adapter
/// and query cache.
pub struct Console {
    pub agents: agents::AgentService,
    pub boards: boards::BoardService,
    pub gateways: gateways::GatewayService,
    pub tags: tags::TagService,
    pub custom_fields: custom_fields::CustomFieldService,
    pub skills: skills::SkillPackService,
    pub h5_users: h5_users::H5UserService,
    pub activity: activity::ActivityService,
    pub metrics: metrics::MetricsService,
}

impl Console {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: Arc<QueryCache>) -> Self {
        Self {
            agents: agents::AgentService::new(Arc::clone(&api), Arc::clone(&cache)),
            boards: boards::BoardService::new(Arc::clone(&api), Arc::clone(&cache)),
            gateways: gateways::GatewayService::new(Arc::clone(&api), Arc::clone(&cache)),
            tags: tags::TagService::new(Arc::clone(&api), Arc::clone(&cache)),
            custom_fields: custom_fields::CustomFieldService::new(
                Arc::clone(&api),
                Arc::clone(&cache),
            ),
            skills: skills::SkillPackService::new(Arc::clone(&api), Arc::clone(&cache)),
            h5_users: h5_users::H5UserService::new(Arc::clone(&api), Arc::clone(&cache)),
            activity: activity::ActivityService::new(Arc::clone(&api), Arc::clone(&cache)),
            metrics: metrics::MetricsService::new(api, cache),
        }
    }

    /// Wire a console from loaded settings: reqwest client plus a fresh
    /// query cache.
    pub fn from_settings(settings: &Settings) -> Result<Self, AppError> {
        let client = ConsoleClient::new(&settings.api)?;
        let cache = Arc::new(QueryCache::new(&CacheConfig::from(&settings.cache)));
        Ok(Self::new(Arc::new(client), cache))
    }
}
