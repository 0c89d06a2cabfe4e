// Detail service - Use case for the buoy detail panel context
use crate::application::telemetry_repository::TelemetryRepository;
use crate::domain::detail::{BuoyDetailContext, DetailReading};
use crate::domain::display::rotate_bearing;
use crate::domain::record::{DisplayValue, MeasurementMode, TelemetryRecord};
use crate::domain::timestamp;
use crate::infrastructure::config::DashboardConfig;
use std::sync::Arc;

#[derive(Clone)]
pub struct DetailService {
    repository: Arc<dyn TelemetryRepository>,
    dashboard_config: DashboardConfig,
}

impl DetailService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, dashboard_config: DashboardConfig) -> Self {
        Self {
            repository,
            dashboard_config,
        }
    }

    /// Build the detail panel context. The latest-observation fetch is
    /// load-bearing; the timestamp and logo fetches degrade to empty
    /// fields so one flaky auxiliary endpoint cannot blank the panel.
    pub async fn buoy_detail(
        &self,
        buoy_id: u32,
        mode: MeasurementMode,
        buoy_name: Option<String>,
    ) -> anyhow::Result<BuoyDetailContext> {
        let records = self.repository.latest_observations(buoy_id).await?;

        let last_time_stamp = match self.repository.last_time_stamp(buoy_id).await {
            Ok(Some(raw)) => {
                let label = timestamp::report_label(&raw);
                if label.is_empty() {
                    label
                } else {
                    format!("{} UTC", label)
                }
            }
            Ok(None) => String::new(),
            Err(e) => {
                tracing::error!("Error fetching last timestamp for buoy {}: {}", buoy_id, e);
                String::new()
            }
        };

        let last_buoy_time_stamp = match self.repository.last_buoy_time_stamp(buoy_id).await {
            Ok(Some(raw)) => timestamp::report_label(&raw),
            Ok(None) => String::new(),
            Err(e) => {
                tracing::error!("Error fetching buoy timestamp for buoy {}: {}", buoy_id, e);
                String::new()
            }
        };

        let logos = match self.repository.buoy_logos(buoy_id).await {
            Ok(logos) => logos,
            Err(e) => {
                tracing::error!("Error fetching logos for buoy {}: {}", buoy_id, e);
                Vec::new()
            }
        };

        let lat_label = records
            .first()
            .and_then(|record| record.lat_label.clone())
            .unwrap_or_default();
        let lon_label = records
            .first()
            .and_then(|record| record.lon_label.clone())
            .unwrap_or_default();

        let readings = build_readings(
            &records,
            mode,
            self.dashboard_config.wind_direction_variable,
        );

        Ok(BuoyDetailContext {
            buoy_id,
            buoy_name: buoy_name.unwrap_or_default(),
            measurement_mode: mode,
            readings,
            last_time_stamp,
            last_buoy_time_stamp,
            lat_label,
            lon_label,
            logos,
        })
    }
}

/// Resolve per-variable readings for the active unit mode, ordered by
/// the upstream variable order. Records without a variable id are
/// dropped silently.
pub fn build_readings(
    records: &[TelemetryRecord],
    mode: MeasurementMode,
    wind_variable_id: u32,
) -> Vec<DetailReading> {
    let mut ordered: Vec<&TelemetryRecord> = records
        .iter()
        .filter(|record| record.variable_id.is_some())
        .collect();
    ordered.sort_by_key(|record| record.variable_order.unwrap_or(i32::MAX));

    ordered
        .into_iter()
        .filter_map(|record| {
            let variable_id = record.variable_id?;
            let value = record.display_value(mode);

            let display_bearing = match (variable_id == wind_variable_id, value) {
                (true, DisplayValue::Number(deg)) => Some(rotate_bearing(deg)),
                _ => None,
            };

            let label = record
                .variable_desc
                .clone()
                .or_else(|| record.variable_name.clone())
                .unwrap_or_default();

            Some(DetailReading {
                variable_id,
                label,
                value,
                unit: record.unit(mode).to_string(),
                cardinal_direction: record.cardinal_direction.clone(),
                display_bearing,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIND_DIRECTION: u32 = 10;

    fn record(variable_id: u32, order: i32, metric: Option<f64>) -> TelemetryRecord {
        TelemetryRecord {
            buoy_id: Some(8),
            variable_id: Some(variable_id),
            timestamp: Some("2024-01-01T00:00:00Z".to_string()),
            value_metric: metric,
            value_imperial: metric.map(|v| v * 2.0),
            unit_metric: "m".to_string(),
            unit_imperial: "ft".to_string(),
            variable_desc: Some(format!("variable {}", variable_id)),
            variable_order: Some(order),
            ..TelemetryRecord::default()
        }
    }

    #[test]
    fn test_readings_follow_variable_order() {
        let records = vec![
            record(9, 2, Some(5.0)),
            record(40, 1, Some(2.5)),
            record(WIND_DIRECTION, 3, Some(270.0)),
        ];
        let readings = build_readings(&records, MeasurementMode::Metric, WIND_DIRECTION);

        let ids: Vec<u32> = readings.iter().map(|r| r.variable_id).collect();
        assert_eq!(ids, vec![40, 9, WIND_DIRECTION]);
    }

    #[test]
    fn test_missing_value_renders_dash_with_unit() {
        let records = vec![record(40, 1, Some(-9999.0))];
        let readings = build_readings(&records, MeasurementMode::Metric, WIND_DIRECTION);

        assert_eq!(readings[0].value.to_string(), "-");
        assert_eq!(readings[0].unit, "m");
    }

    #[test]
    fn test_wind_reading_carries_rotated_bearing() {
        let records = vec![record(WIND_DIRECTION, 1, Some(270.0)), record(9, 2, Some(5.0))];
        let readings = build_readings(&records, MeasurementMode::Metric, WIND_DIRECTION);

        assert_eq!(readings[0].display_bearing, Some(90.0));
        assert_eq!(readings[1].display_bearing, None);

        // No bearing when the wind observation is missing.
        let records = vec![record(WIND_DIRECTION, 1, None)];
        let readings = build_readings(&records, MeasurementMode::Metric, WIND_DIRECTION);
        assert_eq!(readings[0].display_bearing, None);
    }

    #[test]
    fn test_records_without_variable_id_are_dropped() {
        let mut anonymous = record(9, 1, Some(5.0));
        anonymous.variable_id = None;
        let readings = build_readings(&[anonymous], MeasurementMode::Metric, WIND_DIRECTION);
        assert!(readings.is_empty());
    }
}
