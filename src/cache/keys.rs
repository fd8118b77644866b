//! Cache key definitions.
//!
//! A list query is identified by its resource family plus the hash of
//! the applied filter and page window, matching how the console backend
//! parameterizes its list endpoints.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use uuid::Uuid;

use crewdeck_api_types::PageRequest;

/// Console resource families addressable by list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Agents,
    Boards,
    BoardGroups,
    BoardWebhooks,
    Gateways,
    GatewayConnections,
    Tags,
    CustomFields,
    SkillPacks,
    H5Users,
    ActivityEvents,
}

/// Identifies one cached list page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListKey {
    pub resource: ResourceKind,
    pub filter_hash: u64,
    pub page_hash: u64,
}

impl ListKey {
    pub fn new(resource: ResourceKind, filter_hash: u64, page_hash: u64) -> Self {
        Self {
            resource,
            filter_hash,
            page_hash,
        }
    }

    /// Key for a filtered, paginated list query.
    pub fn for_query<F: Hash>(resource: ResourceKind, filter: &F, page: &PageRequest) -> Self {
        Self::new(resource, hash_value(filter), hash_value(page))
    }
}

/// Unified cache key, also used as a stale-marking target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    /// A paginated list query.
    List(ListKey),
    /// The dashboard KPI/series snapshot.
    DashboardMetrics,
    /// The per-gateway traffic card.
    GatewayMetrics(Uuid),
}

impl From<ListKey> for QueryKey {
    fn from(key: ListKey) -> Self {
        Self::List(key)
    }
}

/// Compute a hash for any hashable value.
pub fn hash_value<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use crewdeck_api_types::agents::AgentFilter;

    use super::*;

    #[test]
    fn same_query_produces_same_key() {
        let filter = AgentFilter {
            search: Some("triage".to_string()),
            ..Default::default()
        };
        let page = PageRequest::first(25);

        let key1 = ListKey::for_query(ResourceKind::Agents, &filter, &page);
        let key2 = ListKey::for_query(ResourceKind::Agents, &filter, &page);
        assert_eq!(key1, key2);
    }

    #[test]
    fn different_pages_produce_different_keys() {
        let filter = AgentFilter::default();
        let key1 = ListKey::for_query(ResourceKind::Agents, &filter, &PageRequest::new(25, 0));
        let key2 = ListKey::for_query(ResourceKind::Agents, &filter, &PageRequest::new(25, 25));
        assert_ne!(key1, key2);
    }

    #[test]
    fn resource_kind_separates_otherwise_equal_keys() {
        let key1 = ListKey::new(ResourceKind::Agents, 1, 2);
        let key2 = ListKey::new(ResourceKind::Boards, 1, 2);
        assert_ne!(QueryKey::from(key1), QueryKey::from(key2));
    }
}
