// Streaming chart service - Progressive loading over NDJSON
use crate::application::chart_service::{chart_window, direction_markers, series_payload};
use crate::application::sampling::{interval_for, marker_indices, DeviceClass};
use crate::application::series_builder::build_series;
use crate::application::telemetry_repository::{TelemetryRepository, TimeSeriesQuery};
use crate::domain::record::MeasurementMode;
use crate::domain::series::{SeriesSkeleton, StreamEvent};
use crate::infrastructure::config::DashboardConfig;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

#[derive(Clone)]
pub struct StreamingChartService {
    repository: Arc<dyn TelemetryRepository>,
    dashboard_config: DashboardConfig,
}

impl StreamingChartService {
    pub fn new(repository: Arc<dyn TelemetryRepository>, dashboard_config: DashboardConfig) -> Self {
        Self {
            repository,
            dashboard_config,
        }
    }

    /// Stream the chart response progressively: skeleton first (built
    /// from config alone, no upstream round-trip), then one series
    /// update per charted variable as its fetch lands, then the wind
    /// markers, then a completion event.
    pub async fn stream_chart_data(
        &self,
        buoy_id: u32,
        mode: MeasurementMode,
        device: DeviceClass,
    ) -> mpsc::Receiver<StreamEvent> {
        let (tx, rx) = mpsc::channel(100);
        let started = Instant::now();

        // 1. Skeleton immediately.
        let skeletons: Vec<SeriesSkeleton> = self
            .dashboard_config
            .variables
            .iter()
            .map(|variable| SeriesSkeleton {
                variable_id: variable.id,
                label: variable.label.clone(),
                color: self.dashboard_config.color_for(variable.id),
            })
            .collect();
        // Charted series plus the marker row.
        let widgets = skeletons.len() + 1;

        let _ = tx
            .send(StreamEvent::Skeleton {
                buoy_id,
                measurement_mode: mode,
                series: skeletons,
            })
            .await;

        // The window is computed once and shared by every fetch task.
        let (start_time, end_time) = chart_window(
            self.repository.as_ref(),
            buoy_id,
            self.dashboard_config.chart_window_hours,
        )
        .await;

        let wind_variable = self.dashboard_config.wind_direction_variable;
        let offset_ms = self.dashboard_config.display_offset_ms();
        let mut tasks = Vec::new();

        // 2. Spawn one task per charted variable.
        for variable in &self.dashboard_config.variables {
            let tx = tx.clone();
            let repo = self.repository.clone();
            let variable = variable.clone();
            let color = self.dashboard_config.color_for(variable.id);

            // Wind-annotated series also need the direction values.
            let mut variable_ids = vec![variable.id];
            if variable.show_wind_direction && !variable_ids.contains(&wind_variable) {
                variable_ids.push(wind_variable);
            }
            let query = TimeSeriesQuery {
                buoy_id,
                variable_ids,
                start_time: start_time.clone(),
                end_time: end_time.clone(),
            };

            tasks.push(tokio::spawn(async move {
                match repo.time_series(&query).await {
                    Ok(records) => {
                        let bundle = build_series(&records, mode, wind_variable, offset_ms);
                        if let Some(series) = series_payload(&variable, color, &bundle, mode) {
                            let _ = tx.send(StreamEvent::SeriesUpdate { series }).await;
                        }
                    }
                    Err(e) => {
                        tracing::error!("Error fetching series for variable {}: {}", variable.id, e);
                    }
                }
            }));
        }

        // 3. Wind marker task.
        {
            let tx = tx.clone();
            let repo = self.repository.clone();
            let interval = interval_for(device, &self.dashboard_config.sampling);
            let query = TimeSeriesQuery {
                buoy_id,
                variable_ids: vec![wind_variable],
                start_time: start_time.clone(),
                end_time: end_time.clone(),
            };

            tasks.push(tokio::spawn(async move {
                match repo.time_series(&query).await {
                    Ok(records) => {
                        let bundle = build_series(&records, mode, wind_variable, offset_ms);
                        let indices = marker_indices(&bundle.time_axis, interval);
                        let markers = direction_markers(&bundle, &indices, offset_ms);
                        let _ = tx
                            .send(StreamEvent::Markers {
                                markers,
                                wind_direction_track: bundle.wind_direction_track,
                            })
                            .await;
                    }
                    Err(e) => {
                        tracing::error!("Error fetching wind markers: {}", e);
                    }
                }
            }));
        }

        // 4. Completion once every task has settled.
        tokio::spawn(async move {
            for task in tasks {
                let _ = task.await;
            }
            let duration_ms = started.elapsed().as_millis() as i64;
            let _ = tx
                .send(StreamEvent::Complete {
                    widgets,
                    duration_ms,
                })
                .await;
        });

        rx
    }
}
