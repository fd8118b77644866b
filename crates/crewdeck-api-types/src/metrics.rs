//! Dashboard metrics payloads for KPI and time-series responses.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Range presets selectable on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DashboardRangeKey {
    #[serde(rename = "24h")]
    Day,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "7d")]
    Week,
    #[serde(rename = "14d")]
    TwoWeeks,
    #[serde(rename = "1m")]
    Month,
    #[serde(rename = "3m")]
    Quarter,
    #[serde(rename = "6m")]
    HalfYear,
    #[serde(rename = "1y")]
    Year,
}

/// Bucket width the series points are aggregated by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DashboardBucketKey {
    Hour,
    Day,
    Week,
    Month,
}

/// Single numeric time-series point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSeriesPoint {
    #[serde(with = "time::serde::rfc3339")]
    pub period: OffsetDateTime,
    pub value: f64,
}

/// Work-in-progress point split by task status buckets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardWipPoint {
    #[serde(with = "time::serde::rfc3339")]
    pub period: OffsetDateTime,
    pub inbox: u64,
    pub in_progress: u64,
    pub review: u64,
    pub done: u64,
}

/// Series payload for a single range/bucket combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardRangeSeries {
    pub range: DashboardRangeKey,
    pub bucket: DashboardBucketKey,
    pub points: Vec<DashboardSeriesPoint>,
}

/// WIP series payload for a single range/bucket combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardWipRangeSeries {
    pub range: DashboardRangeKey,
    pub bucket: DashboardBucketKey,
    pub points: Vec<DashboardWipPoint>,
}

/// Primary vs comparison pair for generic series metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSeriesSet {
    pub primary: DashboardRangeSeries,
    pub comparison: DashboardRangeSeries,
}

/// Primary vs comparison pair for WIP status series metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardWipSeriesSet {
    pub primary: DashboardWipRangeSeries,
    pub comparison: DashboardWipRangeSeries,
}

/// Full dashboard snapshot rendered by the metrics page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetricsRead {
    pub throughput: DashboardSeriesSet,
    pub completions: DashboardSeriesSet,
    pub wip: DashboardWipSeriesSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_keys_match_wire_values() {
        assert_eq!(
            serde_json::to_string(&DashboardRangeKey::Day).expect("serialize"),
            r#""24h""#
        );
        assert_eq!(
            serde_json::to_string(&DashboardRangeKey::Year).expect("serialize"),
            r#""1y""#
        );
        let parsed: DashboardBucketKey =
            serde_json::from_str(r#""week""#).expect("bucket should parse");
        assert_eq!(parsed, DashboardBucketKey::Week);
    }
}
