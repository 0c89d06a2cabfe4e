// Chart series construction from raw telemetry records
use crate::domain::record::{MeasurementMode, TelemetryRecord};
use crate::domain::series::{ChartBundle, TimeSeriesPoint};
use crate::domain::timestamp;
use std::collections::{BTreeSet, HashMap};

/// Build the canonical time axis, per-variable point series, and
/// wind-direction track from one batch of raw records.
///
/// The axis is the deduplicated set of canonical timestamps of usable,
/// parseable records, sorted by string comparison (equivalent to
/// chronological order because the canonical form is fixed-width).
/// Per-variable point order follows input record order, which the
/// upstream feed keeps chronological. `display_offset_ms` shifts point
/// x values for display-timezone purposes; the axis strings stay
/// offset-free.
pub fn build_series(
    records: &[TelemetryRecord],
    mode: MeasurementMode,
    wind_variable_id: u32,
    display_offset_ms: i64,
) -> ChartBundle {
    let mut stamps = BTreeSet::new();
    for record in records.iter().filter(|r| r.is_usable()) {
        if let Some(raw) = record.timestamp.as_deref() {
            let canonical = timestamp::canonicalize(raw);
            if timestamp::epoch_millis(&canonical).is_some() {
                stamps.insert(canonical);
            }
        }
    }

    let time_axis: Vec<String> = stamps.into_iter().collect();
    let index_of: HashMap<&str, usize> = time_axis
        .iter()
        .enumerate()
        .map(|(index, stamp)| (stamp.as_str(), index))
        .collect();

    let mut variable_series: HashMap<u32, Vec<TimeSeriesPoint>> = HashMap::new();
    let mut wind_direction_track = vec![f64::NAN; time_axis.len()];

    for record in records {
        let (raw, variable_id) = match (record.timestamp.as_deref(), record.variable_id) {
            (Some(raw), Some(variable_id)) => (raw, variable_id),
            _ => continue,
        };

        let canonical = timestamp::canonicalize(raw);
        let millis = match timestamp::epoch_millis(&canonical) {
            Some(millis) => millis,
            None => continue,
        };
        let index = match index_of.get(canonical.as_str()) {
            Some(&index) => index,
            None => continue,
        };

        let value = record.series_value(mode);
        variable_series
            .entry(variable_id)
            .or_default()
            .push(TimeSeriesPoint::new(millis + display_offset_ms, value));

        if variable_id == wind_variable_id && !value.is_nan() {
            wind_direction_track[index] = value;
        }
    }

    ChartBundle {
        time_axis,
        variable_series,
        wind_direction_track,
    }
}
