//! Dashboard metrics snapshots.
//!
//! The dashboard keeps one snapshot per session keyed by the selected range.
//! Mutations elsewhere mark the snapshot stale instead of refetching it, so
//! the next read here decides whether the cached copy is still usable.

use std::sync::Arc;

use crewdeck_api_types::metrics::{DashboardMetricsRead, DashboardRangeKey};

use crate::application::api::ConsoleApi;
use crate::application::error::AppError;
use crate::cache::{QueryCache, QueryKey, StaleMarker};

pub struct MetricsService {
    api: Arc<dyn ConsoleApi>,
    cache: Arc<QueryCache>,
}

impl MetricsService {
    pub fn new(api: Arc<dyn ConsoleApi>, cache: Arc<QueryCache>) -> Self {
        Self { api, cache }
    }

    /// Returns the dashboard snapshot for `range`, fetching when the cached
    /// copy is missing, stale, or belongs to a different range.
    pub async fn dashboard(
        &self,
        range: DashboardRangeKey,
    ) -> Result<DashboardMetricsRead, AppError> {
        let key = QueryKey::DashboardMetrics;
        if !self.cache.is_stale(&key) {
            if let Some(snapshot) = self.cache.get_dashboard_metrics(range) {
                return Ok(snapshot);
            }
        }
        let snapshot = self.api.dashboard_metrics(range).await?;
        self.cache.set_dashboard_metrics(range, snapshot.clone());
        self.cache.clear_stale(&key);
        Ok(snapshot)
    }
}
