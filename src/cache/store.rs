//! Query cache storage.
//!
//! Caches paginated console list responses plus the dashboard and
//! per-gateway metrics snapshots, keyed by [`ListKey`]/[`QueryKey`].
//! List slots use LRU eviction with configurable limits.

use std::collections::HashSet;
use std::sync::RwLock;

use lru::LruCache;
use metrics::counter;
use tracing::debug;
use uuid::Uuid;

use crewdeck_api_types::ListPage;
use crewdeck_api_types::activity::ActivityEventRead;
use crewdeck_api_types::agents::AgentRead;
use crewdeck_api_types::boards::{BoardGroupRead, BoardRead, BoardWebhookRead};
use crewdeck_api_types::custom_fields::CustomFieldRead;
use crewdeck_api_types::gateways::{GatewayConnectionRead, GatewayMetricsRead, GatewayRead};
use crewdeck_api_types::h5_users::H5UserRead;
use crewdeck_api_types::metrics::{DashboardMetricsRead, DashboardRangeKey};
use crewdeck_api_types::skills::SkillPackRead;
use crewdeck_api_types::tags::TagRead;

use super::config::CacheConfig;
use super::keys::{ListKey, QueryKey, ResourceKind};
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";
const METRIC_HIT: &str = "crewdeck_query_cache_hit_total";
const METRIC_MISS: &str = "crewdeck_query_cache_miss_total";

/// Stale flagging shared by every cached query key.
///
/// A stale key keeps serving its cached value to direct reads; the
/// owning service is expected to refetch on its next pass and then
/// clear the flag.
pub trait StaleMarker {
    fn mark_stale(&self, key: &QueryKey);
    fn is_stale(&self, key: &QueryKey) -> bool;
    fn clear_stale(&self, key: &QueryKey);
}

/// Read/write access to cached list pages for one entity type.
///
/// The optimistic delete coordinator is generic over this seam, so
/// tests can substitute a minimal in-memory store.
pub trait ListStore<T>: StaleMarker {
    fn get_page(&self, key: &ListKey) -> Option<ListPage<T>>;
    fn put_page(&self, key: ListKey, page: ListPage<T>);
}

/// In-memory query cache backing the console services.
pub struct QueryCache {
    enabled: bool,

    // List slots (LRU eviction per resource family)
    agent_lists: RwLock<LruCache<ListKey, ListPage<AgentRead>>>,
    board_lists: RwLock<LruCache<ListKey, ListPage<BoardRead>>>,
    board_group_lists: RwLock<LruCache<ListKey, ListPage<BoardGroupRead>>>,
    board_webhook_lists: RwLock<LruCache<ListKey, ListPage<BoardWebhookRead>>>,
    gateway_lists: RwLock<LruCache<ListKey, ListPage<GatewayRead>>>,
    gateway_connection_lists: RwLock<LruCache<ListKey, ListPage<GatewayConnectionRead>>>,
    tag_lists: RwLock<LruCache<ListKey, ListPage<TagRead>>>,
    custom_field_lists: RwLock<LruCache<ListKey, ListPage<CustomFieldRead>>>,
    skill_pack_lists: RwLock<LruCache<ListKey, ListPage<SkillPackRead>>>,
    h5_user_lists: RwLock<LruCache<ListKey, ListPage<H5UserRead>>>,
    activity_lists: RwLock<LruCache<ListKey, ListPage<ActivityEventRead>>>,

    // Metrics snapshots
    dashboard_metrics: RwLock<Option<(DashboardRangeKey, DashboardMetricsRead)>>,
    gateway_metrics: RwLock<LruCache<Uuid, GatewayMetricsRead>>,

    // Keys flagged for refetch
    stale: RwLock<HashSet<QueryKey>>,
}

impl QueryCache {
    /// Create a new query cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let lists = config.list_page_limit_non_zero();
        Self {
            enabled: config.enable_query_cache,
            agent_lists: RwLock::new(LruCache::new(lists)),
            board_lists: RwLock::new(LruCache::new(lists)),
            board_group_lists: RwLock::new(LruCache::new(lists)),
            board_webhook_lists: RwLock::new(LruCache::new(lists)),
            gateway_lists: RwLock::new(LruCache::new(lists)),
            gateway_connection_lists: RwLock::new(LruCache::new(lists)),
            tag_lists: RwLock::new(LruCache::new(lists)),
            custom_field_lists: RwLock::new(LruCache::new(lists)),
            skill_pack_lists: RwLock::new(LruCache::new(lists)),
            h5_user_lists: RwLock::new(LruCache::new(lists)),
            activity_lists: RwLock::new(LruCache::new(lists)),
            dashboard_metrics: RwLock::new(None),
            gateway_metrics: RwLock::new(LruCache::new(config.gateway_metrics_limit_non_zero())),
            stale: RwLock::new(HashSet::new()),
        }
    }

    fn track<T>(resource: &'static str, value: Option<T>) -> Option<T> {
        match value {
            Some(value) => {
                counter!(METRIC_HIT, "resource" => resource).increment(1);
                Some(value)
            }
            None => {
                counter!(METRIC_MISS, "resource" => resource).increment(1);
                None
            }
        }
    }

    /// Drop every cached list page for one resource family.
    ///
    /// Called after create/update writes, which can reorder or grow
    /// lists in ways a point patch cannot reproduce.
    pub fn invalidate_lists(&self, resource: ResourceKind) {
        match resource {
            ResourceKind::Agents => {
                rw_write(&self.agent_lists, SOURCE, "invalidate_lists.agents").clear();
            }
            ResourceKind::Boards => {
                rw_write(&self.board_lists, SOURCE, "invalidate_lists.boards").clear();
            }
            ResourceKind::BoardGroups => {
                rw_write(&self.board_group_lists, SOURCE, "invalidate_lists.board_groups").clear();
            }
            ResourceKind::BoardWebhooks => {
                rw_write(&self.board_webhook_lists, SOURCE, "invalidate_lists.board_webhooks")
                    .clear();
            }
            ResourceKind::Gateways => {
                rw_write(&self.gateway_lists, SOURCE, "invalidate_lists.gateways").clear();
            }
            ResourceKind::GatewayConnections => {
                rw_write(
                    &self.gateway_connection_lists,
                    SOURCE,
                    "invalidate_lists.gateway_connections",
                )
                .clear();
            }
            ResourceKind::Tags => {
                rw_write(&self.tag_lists, SOURCE, "invalidate_lists.tags").clear();
            }
            ResourceKind::CustomFields => {
                rw_write(&self.custom_field_lists, SOURCE, "invalidate_lists.custom_fields")
                    .clear();
            }
            ResourceKind::SkillPacks => {
                rw_write(&self.skill_pack_lists, SOURCE, "invalidate_lists.skill_packs").clear();
            }
            ResourceKind::H5Users => {
                rw_write(&self.h5_user_lists, SOURCE, "invalidate_lists.h5_users").clear();
            }
            ResourceKind::ActivityEvents => {
                rw_write(&self.activity_lists, SOURCE, "invalidate_lists.activity").clear();
            }
        }
        debug!(resource = ?resource, "Dropped cached list pages");
    }

    // ========================================================================
    // Metrics snapshots
    // ========================================================================

    pub fn get_dashboard_metrics(
        &self,
        range: DashboardRangeKey,
    ) -> Option<DashboardMetricsRead> {
        if !self.enabled {
            return None;
        }
        let cached = rw_read(&self.dashboard_metrics, SOURCE, "get_dashboard_metrics")
            .as_ref()
            .filter(|(cached_range, _)| *cached_range == range)
            .map(|(_, snapshot)| snapshot.clone());
        Self::track("dashboard_metrics", cached)
    }

    pub fn set_dashboard_metrics(&self, range: DashboardRangeKey, snapshot: DashboardMetricsRead) {
        if !self.enabled {
            return;
        }
        *rw_write(&self.dashboard_metrics, SOURCE, "set_dashboard_metrics") =
            Some((range, snapshot));
    }

    pub fn get_gateway_metrics(&self, gateway_id: Uuid) -> Option<GatewayMetricsRead> {
        if !self.enabled {
            return None;
        }
        let cached = rw_write(&self.gateway_metrics, SOURCE, "get_gateway_metrics")
            .get(&gateway_id)
            .cloned();
        Self::track("gateway_metrics", cached)
    }

    pub fn set_gateway_metrics(&self, snapshot: GatewayMetricsRead) {
        if !self.enabled {
            return;
        }
        rw_write(&self.gateway_metrics, SOURCE, "set_gateway_metrics")
            .put(snapshot.gateway_id, snapshot);
    }

    /// Clear all cached data and stale flags.
    pub fn clear(&self) {
        for resource in [
            ResourceKind::Agents,
            ResourceKind::Boards,
            ResourceKind::BoardGroups,
            ResourceKind::BoardWebhooks,
            ResourceKind::Gateways,
            ResourceKind::GatewayConnections,
            ResourceKind::Tags,
            ResourceKind::CustomFields,
            ResourceKind::SkillPacks,
            ResourceKind::H5Users,
            ResourceKind::ActivityEvents,
        ] {
            self.invalidate_lists(resource);
        }
        *rw_write(&self.dashboard_metrics, SOURCE, "clear.dashboard_metrics") = None;
        rw_write(&self.gateway_metrics, SOURCE, "clear.gateway_metrics").clear();
        rw_write(&self.stale, SOURCE, "clear.stale").clear();
    }
}

impl StaleMarker for QueryCache {
    fn mark_stale(&self, key: &QueryKey) {
        if rw_write(&self.stale, SOURCE, "mark_stale").insert(*key) {
            debug!(key = ?key, "Marked query key stale");
        }
    }

    fn is_stale(&self, key: &QueryKey) -> bool {
        rw_read(&self.stale, SOURCE, "is_stale").contains(key)
    }

    fn clear_stale(&self, key: &QueryKey) {
        rw_write(&self.stale, SOURCE, "clear_stale").remove(key);
    }
}

macro_rules! impl_list_store {
    ($entity:ty, $slot:ident, $label:literal) => {
        impl ListStore<$entity> for QueryCache {
            fn get_page(&self, key: &ListKey) -> Option<ListPage<$entity>> {
                if !self.enabled {
                    return None;
                }
                let cached = rw_write(&self.$slot, SOURCE, concat!("get_page.", $label))
                    .get(key)
                    .cloned();
                Self::track($label, cached)
            }

            fn put_page(&self, key: ListKey, page: ListPage<$entity>) {
                if !self.enabled {
                    return;
                }
                rw_write(&self.$slot, SOURCE, concat!("put_page.", $label)).put(key, page);
            }
        }
    };
}

impl_list_store!(AgentRead, agent_lists, "agents");
impl_list_store!(BoardRead, board_lists, "boards");
impl_list_store!(BoardGroupRead, board_group_lists, "board_groups");
impl_list_store!(BoardWebhookRead, board_webhook_lists, "board_webhooks");
impl_list_store!(GatewayRead, gateway_lists, "gateways");
impl_list_store!(GatewayConnectionRead, gateway_connection_lists, "gateway_connections");
impl_list_store!(TagRead, tag_lists, "tags");
impl_list_store!(CustomFieldRead, custom_field_lists, "custom_fields");
impl_list_store!(SkillPackRead, skill_pack_lists, "skill_packs");
impl_list_store!(H5UserRead, h5_user_lists, "h5_users");
impl_list_store!(ActivityEventRead, activity_lists, "activity_events");

#[cfg(test)]
mod tests {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    use time::OffsetDateTime;

    use crewdeck_api_types::agents::AgentStatus;

    use super::*;

    fn sample_agent(id: Uuid, name: &str) -> AgentRead {
        AgentRead {
            id,
            organization_id: Uuid::nil(),
            name: name.to_string(),
            role: None,
            description: None,
            status: AgentStatus::Idle,
            board_id: None,
            gateway_id: None,
            created_at: OffsetDateTime::now_utc(),
            updated_at: OffsetDateTime::now_utc(),
        }
    }

    fn sample_page(ids: &[Uuid]) -> ListPage<AgentRead> {
        ListPage {
            items: ids
                .iter()
                .map(|id| sample_agent(*id, "agent"))
                .collect(),
            total: ids.len() as u64,
            limit: 25,
            offset: 0,
        }
    }

    fn agent_key(filter_hash: u64) -> ListKey {
        ListKey::new(ResourceKind::Agents, filter_hash, 0)
    }

    #[test]
    fn list_page_roundtrip() {
        let cache = QueryCache::new(&CacheConfig::default());
        let key = agent_key(1);

        assert!(ListStore::<AgentRead>::get_page(&cache, &key).is_none());

        let page = sample_page(&[Uuid::new_v4(), Uuid::new_v4()]);
        cache.put_page(key, page.clone());

        let cached = ListStore::<AgentRead>::get_page(&cache, &key).expect("cached page");
        assert_eq!(cached, page);
    }

    #[test]
    fn disabled_cache_never_stores() {
        let cache = QueryCache::new(&CacheConfig {
            enable_query_cache: false,
            ..Default::default()
        });
        let key = agent_key(1);

        cache.put_page(key, sample_page(&[Uuid::new_v4()]));
        assert!(ListStore::<AgentRead>::get_page(&cache, &key).is_none());
    }

    #[test]
    fn list_slot_evicts_lru() {
        let cache = QueryCache::new(&CacheConfig {
            list_page_limit: 2,
            ..Default::default()
        });

        cache.put_page(agent_key(1), sample_page(&[Uuid::new_v4()]));
        cache.put_page(agent_key(2), sample_page(&[Uuid::new_v4()]));
        cache.put_page(agent_key(3), sample_page(&[Uuid::new_v4()]));

        assert!(ListStore::<AgentRead>::get_page(&cache, &agent_key(1)).is_none());
        assert!(ListStore::<AgentRead>::get_page(&cache, &agent_key(2)).is_some());
        assert!(ListStore::<AgentRead>::get_page(&cache, &agent_key(3)).is_some());
    }

    #[test]
    fn invalidate_lists_drops_only_that_resource() {
        let cache = QueryCache::new(&CacheConfig::default());
        let key = agent_key(1);
        cache.put_page(key, sample_page(&[Uuid::new_v4()]));

        cache.invalidate_lists(ResourceKind::Boards);
        assert!(ListStore::<AgentRead>::get_page(&cache, &key).is_some());

        cache.invalidate_lists(ResourceKind::Agents);
        assert!(ListStore::<AgentRead>::get_page(&cache, &key).is_none());
    }

    #[test]
    fn stale_flags_roundtrip() {
        let cache = QueryCache::new(&CacheConfig::default());
        let key = QueryKey::List(agent_key(1));

        assert!(!cache.is_stale(&key));
        cache.mark_stale(&key);
        assert!(cache.is_stale(&key));
        cache.clear_stale(&key);
        assert!(!cache.is_stale(&key));
    }

    #[test]
    fn recovers_from_poisoned_lock() {
        let cache = QueryCache::new(&CacheConfig::default());

        let _ = catch_unwind(AssertUnwindSafe(|| {
            let _guard = cache
                .stale
                .write()
                .expect("stale lock should be acquired");
            panic!("poison stale lock");
        }));

        cache.mark_stale(&QueryKey::DashboardMetrics);
        assert!(cache.is_stale(&QueryKey::DashboardMetrics));
    }
}
