// Repository trait for upstream telemetry data access
use crate::domain::buoy::{Buoy, BuoyLogo};
use crate::domain::record::TelemetryRecord;
use async_trait::async_trait;
use serde::Serialize;

/// Bounds and variable selection for a chart-window fetch. The window
/// is computed by the caller; the pipeline never derives it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesQuery {
    pub buoy_id: u32,
    pub variable_ids: Vec<u32>,
    pub start_time: String,
    pub end_time: String,
}

#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// List every buoy known upstream, across all sites.
    async fn list_buoys(&self) -> anyhow::Result<Vec<Buoy>>;

    /// Latest observation per variable for one buoy.
    async fn latest_observations(&self, buoy_id: u32) -> anyhow::Result<Vec<TelemetryRecord>>;

    /// Raw observations for a set of variables over a time window.
    async fn time_series(&self, query: &TimeSeriesQuery) -> anyhow::Result<Vec<TelemetryRecord>>;

    /// Most recent observation timestamp across the whole feed.
    async fn last_time_stamp(&self, buoy_id: u32) -> anyhow::Result<Option<String>>;

    /// Most recent timestamp reported by the buoy itself.
    async fn last_buoy_time_stamp(&self, buoy_id: u32) -> anyhow::Result<Option<String>>;

    async fn buoy_logos(&self, buoy_id: u32) -> anyhow::Result<Vec<BuoyLogo>>;
}
