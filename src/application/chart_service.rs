// Chart service - Use case for assembling chart data for one buoy
use crate::application::sampling::{interval_for, marker_indices, DeviceClass};
use crate::application::series_builder::build_series;
use crate::application::telemetry_repository::{TelemetryRepository, TimeSeriesQuery};
use crate::domain::display::{axis_label, rotate_bearing};
use crate::domain::record::{MeasurementMode, MISSING_MARKER};
use crate::domain::series::{ChartBundle, ChartPayload, ChartSeriesPayload, DirectionMarker, TimeSeriesPoint};
use crate::domain::timestamp;
use crate::infrastructure::config::{DashboardConfig, VariableConfig};
use chrono::{Duration, SecondsFormat, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct ChartService {
    repository: Arc<dyn TelemetryRepository>,
    dashboard_config: DashboardConfig,
}

impl ChartService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, dashboard_config: DashboardConfig) -> Self {
        Self {
            repository,
            dashboard_config,
        }
    }

    pub async fn chart_data(
        &self,
        buoy_id: u32,
        mode: MeasurementMode,
        device: DeviceClass,
    ) -> anyhow::Result<ChartPayload> {
        let (start_time, end_time) = chart_window(
            self.repository.as_ref(),
            buoy_id,
            self.dashboard_config.chart_window_hours,
        )
        .await;

        let query = TimeSeriesQuery {
            buoy_id,
            variable_ids: self.dashboard_config.tracked_ids(),
            start_time,
            end_time,
        };
        let records = self.repository.time_series(&query).await?;
        tracing::debug!("fetched {} records for buoy {}", records.len(), buoy_id);

        let offset_ms = self.dashboard_config.display_offset_ms();
        let bundle = build_series(
            &records,
            mode,
            self.dashboard_config.wind_direction_variable,
            offset_ms,
        );

        let interval = interval_for(device, &self.dashboard_config.sampling);
        let indices = marker_indices(&bundle.time_axis, interval);
        let markers = direction_markers(&bundle, &indices, offset_ms);

        let series = self
            .dashboard_config
            .variables
            .iter()
            .filter_map(|variable| {
                series_payload(
                    variable,
                    self.dashboard_config.color_for(variable.id),
                    &bundle,
                    mode,
                )
            })
            .collect();

        Ok(ChartPayload {
            buoy_id,
            measurement_mode: mode,
            time_axis: bundle.time_axis,
            series,
            wind_direction_track: bundle.wind_direction_track,
            selected_indices: indices,
            markers,
        })
    }
}

/// Compute the chart window: it ends at the feed's most recent report
/// and spans `window_hours` back from there. A missing or unparseable
/// last report falls back to the current instant.
pub async fn chart_window(
    repository: &dyn TelemetryRepository,
    buoy_id: u32,
    window_hours: i64,
) -> (String, String) {
    let end = match repository.last_time_stamp(buoy_id).await {
        Ok(Some(raw)) => timestamp::parse_instant(&timestamp::canonicalize(&raw))
            .map(|instant| instant.with_timezone(&Utc))
            .unwrap_or_else(Utc::now),
        Ok(None) => Utc::now(),
        Err(e) => {
            tracing::debug!("last timestamp unavailable for buoy {}: {}", buoy_id, e);
            Utc::now()
        }
    };
    let start = end - Duration::hours(window_hours);

    (
        start.to_rfc3339_opts(SecondsFormat::Millis, true),
        end.to_rfc3339_opts(SecondsFormat::Millis, true),
    )
}

/// Assemble one renderable series from the bundle, or None when the
/// variable produced no points.
pub fn series_payload(
    variable: &VariableConfig,
    color: String,
    bundle: &ChartBundle,
    mode: MeasurementMode,
) -> Option<ChartSeriesPayload> {
    let points = bundle.variable_series.get(&variable.id)?.clone();
    if points.is_empty() {
        return None;
    }

    let wind_track = variable
        .show_wind_direction
        .then_some(bundle.wind_direction_track.as_slice());
    let tooltips = point_tooltips(&points, &variable.label, variable.unit_for(mode), wind_track);
    let latest_label = axis_label(points.last().map(|point| point.y));

    Some(ChartSeriesPayload {
        variable_id: variable.id,
        label: variable.label.clone(),
        color,
        points,
        tooltips,
        latest_label,
    })
}

/// Wind-direction markers at the sampled axis indices. Indices whose
/// track slot holds no observation are left out, matching the rendered
/// arrow row.
pub fn direction_markers(
    bundle: &ChartBundle,
    indices: &[usize],
    display_offset_ms: i64,
) -> Vec<DirectionMarker> {
    indices
        .iter()
        .filter_map(|&index| {
            let bearing = *bundle.wind_direction_track.get(index)?;
            if bearing.is_nan() {
                return None;
            }
            let stamp = bundle.time_axis.get(index)?;
            let millis =
                timestamp::epoch_millis(&timestamp::canonicalize(stamp))? + display_offset_ms;

            Some(DirectionMarker {
                index,
                time_label: timestamp::clock_label(millis),
                bearing_deg: bearing,
                rotation_deg: rotate_bearing(bearing),
            })
        })
        .collect()
}

fn point_tooltips(
    points: &[TimeSeriesPoint],
    label: &str,
    unit: &str,
    wind_track: Option<&[f64]>,
) -> Vec<String> {
    points
        .iter()
        .enumerate()
        .map(|(index, point)| {
            let value = if point.y.is_nan() {
                MISSING_MARKER.to_string()
            } else {
                format!("{}", point.y)
            };

            let mut text = if unit.is_empty() {
                format!("{} {}: {}", timestamp::tooltip_label(point.x), label, value)
            } else {
                format!(
                    "{} {}: {} {}",
                    timestamp::tooltip_label(point.x),
                    label,
                    value,
                    unit
                )
            };

            // Point order is assumed axis-aligned, so the point index
            // doubles as the wind-track index.
            if let Some(track) = wind_track {
                if let Some(bearing) = track.get(index).copied().filter(|b| !b.is_nan()) {
                    text.push_str(&format!(
                        ", wind {}\u{b0} (arrow {}\u{b0})",
                        bearing,
                        rotate_bearing(bearing)
                    ));
                }
            }

            text
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::record::TelemetryRecord;

    const WIND_DIRECTION: u32 = 10;

    fn record(variable_id: u32, stamp: &str, metric: f64) -> TelemetryRecord {
        TelemetryRecord {
            buoy_id: Some(8),
            variable_id: Some(variable_id),
            timestamp: Some(stamp.to_string()),
            value_metric: Some(metric),
            value_imperial: Some(metric * 2.0),
            ..TelemetryRecord::default()
        }
    }

    fn wind_speed_variable() -> VariableConfig {
        VariableConfig {
            id: 9,
            label: "Wind speed".to_string(),
            unit_metric: "m/s".to_string(),
            unit_imperial: "mph".to_string(),
            color: None,
            show_wind_direction: true,
        }
    }

    fn bundle() -> ChartBundle {
        let records = vec![
            record(9, "2024-01-01T00:00:00Z", 5.0),
            record(WIND_DIRECTION, "2024-01-01T00:00:00Z", 270.0),
            record(9, "2024-01-01T02:00:00Z", -9999.0),
            record(9, "2024-01-01T04:00:00Z", 7.5),
            record(WIND_DIRECTION, "2024-01-01T04:00:00Z", 90.0),
        ];
        build_series(&records, MeasurementMode::Metric, WIND_DIRECTION, 0)
    }

    #[test]
    fn test_series_payload_tooltips_and_latest_label() {
        let payload = series_payload(
            &wind_speed_variable(),
            "#008FFB".to_string(),
            &bundle(),
            MeasurementMode::Metric,
        )
        .unwrap();

        assert_eq!(payload.points.len(), 3);
        assert_eq!(payload.tooltips.len(), 3);
        assert_eq!(
            payload.tooltips[0],
            "2024/01/01 00:00 Wind speed: 5 m/s, wind 270\u{b0} (arrow 90\u{b0})"
        );
        // The gap point renders the dash marker and carries no wind
        // annotation (nothing observed at that axis position).
        assert_eq!(payload.tooltips[1], "2024/01/01 02:00 Wind speed: - m/s");
        assert_eq!(payload.latest_label, "7.50");
        assert_eq!(payload.color, "#008FFB");
    }

    #[test]
    fn test_series_payload_none_when_variable_absent() {
        let variable = VariableConfig {
            id: 40,
            label: "Max wave height".to_string(),
            unit_metric: "m".to_string(),
            unit_imperial: "ft".to_string(),
            color: None,
            show_wind_direction: false,
        };
        assert!(series_payload(&variable, "#FEB019".to_string(), &bundle(), MeasurementMode::Metric).is_none());
    }

    #[test]
    fn test_direction_markers_skip_empty_track_slots() {
        let bundle = bundle();
        // Axis has three entries; the middle one has no wind reading.
        let markers = direction_markers(&bundle, &[0, 1, 2], 0);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].index, 0);
        assert_eq!(markers[0].bearing_deg, 270.0);
        assert_eq!(markers[0].rotation_deg, 90.0);
        assert_eq!(markers[0].time_label, "00:00");
        assert_eq!(markers[1].index, 2);
        assert_eq!(markers[1].time_label, "04:00");
    }

    #[test]
    fn test_direction_marker_labels_follow_display_offset() {
        let records = vec![record(WIND_DIRECTION, "2024-01-01T00:00:00Z", 180.0)];
        let offset_ms = 9 * 3_600_000;
        let bundle = build_series(&records, MeasurementMode::Metric, WIND_DIRECTION, offset_ms);
        let markers = direction_markers(&bundle, &[0], offset_ms);

        assert_eq!(markers[0].time_label, "09:00");
        assert_eq!(markers[0].rotation_deg, 0.0);
    }
}
