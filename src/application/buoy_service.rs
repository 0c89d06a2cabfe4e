// Buoy service - Use case for listing buoys for the map layer
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::buoy::Buoy;
use std::sync::Arc;

#[derive(Clone)]
pub struct BuoyService {
    repository: Arc<dyn TelemetryRepository>,
    site: String,
}

impl BuoyService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, site: String) -> Self {
        Self { repository, site }
    }

    /// Buoys belonging to this deployment's site.
    pub async fn list_buoys(&self) -> anyhow::Result<Vec<Buoy>> {
        let buoys = self.repository.list_buoys().await?;
        Ok(buoys
            .into_iter()
            .filter(|buoy| buoy.matches_site(&self.site))
            .collect())
    }
}
