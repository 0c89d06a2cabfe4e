// Upstream buoy data API repository implementation
use crate::application::telemetry_repository::{TelemetryRepository, TimeSeriesQuery};
use crate::domain::buoy::{Buoy, BuoyLogo};
use crate::domain::record::TelemetryRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
}

#[derive(Debug, Clone)]
pub struct BuoyApiRepository {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl BuoyApiRepository {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}{}?apiKey={}",
            self.base_url,
            path,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, UpstreamError> {
        let response = self
            .client
            .get(self.endpoint_url(path))
            .header("Accept", "application/json")
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, UpstreamError> {
        let response = self
            .client
            .post(self.endpoint_url(path))
            .json(body)
            .send()
            .await?;

        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, UpstreamError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status { status, body });
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl TelemetryRepository for BuoyApiRepository {
    async fn list_buoys(&self) -> Result<Vec<Buoy>> {
        self.get_json("/buoys")
            .await
            .context("Failed to list buoys from upstream")
    }

    async fn latest_observations(&self, buoy_id: u32) -> Result<Vec<TelemetryRecord>> {
        self.get_json(&format!("/buoyVars/{}", buoy_id))
            .await
            .with_context(|| format!("Failed to fetch latest observations for buoy {}", buoy_id))
    }

    async fn time_series(&self, query: &TimeSeriesQuery) -> Result<Vec<TelemetryRecord>> {
        tracing::debug!(
            "Executing time series query for buoy {} ({} variables)",
            query.buoy_id,
            query.variable_ids.len()
        );
        self.post_json("/timeSeriesData", query)
            .await
            .with_context(|| format!("Failed to fetch time series for buoy {}", query.buoy_id))
    }

    async fn last_time_stamp(&self, buoy_id: u32) -> Result<Option<String>> {
        self.get_json(&format!("/lastTimeStamp/{}", buoy_id))
            .await
            .with_context(|| format!("Failed to fetch last timestamp for buoy {}", buoy_id))
    }

    async fn last_buoy_time_stamp(&self, buoy_id: u32) -> Result<Option<String>> {
        self.get_json(&format!("/lastBuoyTimeStamp/{}", buoy_id))
            .await
            .with_context(|| format!("Failed to fetch last buoy timestamp for buoy {}", buoy_id))
    }

    async fn buoy_logos(&self, buoy_id: u32) -> Result<Vec<BuoyLogo>> {
        self.get_json(&format!("/buoyLogos/{}", buoy_id))
            .await
            .with_context(|| format!("Failed to fetch logos for buoy {}", buoy_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_encodes_api_key() {
        let repo = BuoyApiRepository::new(
            "https://data.example.org/api/".to_string(),
            "k&y 1".to_string(),
        );
        assert_eq!(
            repo.endpoint_url("/buoyVars/8"),
            "https://data.example.org/api/buoyVars/8?apiKey=k%26y%201"
        );
    }
}
