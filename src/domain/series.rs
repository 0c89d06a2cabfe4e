// Chart series domain models
use super::record::MeasurementMode;
use serde::Serialize;
use std::collections::HashMap;

/// One chart point. `x` is epoch milliseconds (with the display offset
/// already applied); a NaN `y` is a gap and serializes as JSON null,
/// which breaks the rendered line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeSeriesPoint {
    pub x: i64,
    pub y: f64,
}

impl TimeSeriesPoint {
    pub fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Normalized chart structures recomputed from scratch on every input
/// change: the canonical time axis, per-variable point series aligned
/// to input record order, and the wind-direction track parallel to the
/// axis.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBundle {
    pub time_axis: Vec<String>,
    pub variable_series: HashMap<u32, Vec<TimeSeriesPoint>>,
    pub wind_direction_track: Vec<f64>,
}

/// One renderable series: points plus the per-point tooltip text the
/// chart widget treats as opaque display strings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSeriesPayload {
    pub variable_id: u32,
    pub label: String,
    pub color: String,
    pub points: Vec<TimeSeriesPoint>,
    pub tooltips: Vec<String>,
    /// Axis-label rendering of the most recent point, empty when that
    /// point is a gap.
    pub latest_label: String,
}

/// A sampled wind-direction marker for the sparse arrow row.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionMarker {
    /// Position on the canonical time axis.
    pub index: usize,
    pub time_label: String,
    /// Raw meteorological "coming-from" bearing.
    pub bearing_deg: f64,
    /// Inverted "going-to" bearing for the arrow glyph.
    pub rotation_deg: f64,
}

/// Complete chart response for one buoy.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    pub buoy_id: u32,
    pub measurement_mode: MeasurementMode,
    pub time_axis: Vec<String>,
    pub series: Vec<ChartSeriesPayload>,
    pub wind_direction_track: Vec<f64>,
    /// Sampled axis indices, boundaries always included.
    pub selected_indices: Vec<usize>,
    pub markers: Vec<DirectionMarker>,
}

/// Series metadata sent ahead of data in the progressive response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSkeleton {
    pub variable_id: u32,
    pub label: String,
    pub color: String,
}

/// One NDJSON line of the progressive chart response.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StreamEvent {
    #[serde(rename_all = "camelCase")]
    Skeleton {
        buoy_id: u32,
        measurement_mode: MeasurementMode,
        series: Vec<SeriesSkeleton>,
    },
    #[serde(rename_all = "camelCase")]
    SeriesUpdate { series: ChartSeriesPayload },
    #[serde(rename_all = "camelCase")]
    Markers {
        markers: Vec<DirectionMarker>,
        wind_direction_track: Vec<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Complete { widgets: usize, duration_ms: i64 },
}
