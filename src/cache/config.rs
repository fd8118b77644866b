//! Query cache configuration.

use std::num::NonZeroUsize;

use serde::Deserialize;

const DEFAULT_LIST_PAGE_LIMIT: usize = 64;
const DEFAULT_GATEWAY_METRICS_LIMIT: usize = 32;

/// Runtime configuration for the query cache.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Enable the in-memory query cache. When disabled every read is a
    /// miss and writes are dropped, so callers always hit the API.
    pub enable_query_cache: bool,
    /// Maximum cached list pages per resource family.
    pub list_page_limit: usize,
    /// Maximum cached per-gateway metrics cards.
    pub gateway_metrics_limit: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enable_query_cache: true,
            list_page_limit: DEFAULT_LIST_PAGE_LIMIT,
            gateway_metrics_limit: DEFAULT_GATEWAY_METRICS_LIMIT,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            enable_query_cache: settings.enable_query_cache,
            list_page_limit: settings.list_page_limit,
            gateway_metrics_limit: settings.gateway_metrics_limit,
        }
    }
}

impl CacheConfig {
    /// Returns the list page limit as NonZeroUsize, clamping to 1 if zero.
    pub fn list_page_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.list_page_limit).unwrap_or(NonZeroUsize::MIN)
    }

    /// Returns the gateway metrics limit as NonZeroUsize, clamping to 1 if zero.
    pub fn gateway_metrics_limit_non_zero(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.gateway_metrics_limit).unwrap_or(NonZeroUsize::MIN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert!(config.enable_query_cache);
        assert_eq!(config.list_page_limit, 64);
        assert_eq!(config.gateway_metrics_limit, 32);
    }

    #[test]
    fn non_zero_clamps_to_min() {
        let config = CacheConfig {
            list_page_limit: 0,
            ..Default::default()
        };
        assert_eq!(config.list_page_limit_non_zero().get(), 1);
    }
}
