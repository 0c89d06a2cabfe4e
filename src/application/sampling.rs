// Sparse marker index selection over the canonical time axis
use crate::domain::timestamp;
use crate::infrastructure::config::SamplingConfig;

const MILLIS_PER_HOUR: i64 = 3_600_000;

/// Viewport classification supplied by the caller; narrow viewports get
/// coarser marker sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceClass {
    Coarse,
    #[default]
    Fine,
}

impl DeviceClass {
    pub fn from_param(raw: &str) -> Self {
        match raw {
            "coarse" => DeviceClass::Coarse,
            _ => DeviceClass::Fine,
        }
    }
}

pub fn interval_for(device: DeviceClass, sampling: &SamplingConfig) -> i64 {
    match device {
        DeviceClass::Coarse => sampling.coarse_interval_hours,
        DeviceClass::Fine => sampling.fine_interval_hours,
    }
}

/// Select the axis indices whose whole-hour offset from the first entry
/// is a multiple of `interval_hours`. Unparseable entries are skipped.
/// The first and last indices are always forced into the result so the
/// marker row shows both boundary observations.
pub fn marker_indices(time_axis: &[String], interval_hours: i64) -> Vec<usize> {
    if time_axis.is_empty() {
        return Vec::new();
    }

    let mut indices = Vec::new();
    let reference = timestamp::epoch_millis(&timestamp::canonicalize(&time_axis[0]));

    if let Some(base) = reference {
        if interval_hours > 0 {
            for (index, stamp) in time_axis.iter().enumerate() {
                let current = match timestamp::epoch_millis(&timestamp::canonicalize(stamp)) {
                    Some(current) => current,
                    None => continue,
                };
                let hours = (current - base).div_euclid(MILLIS_PER_HOUR);
                if hours % interval_hours == 0 {
                    indices.push(index);
                }
            }
        }
    }

    if !indices.contains(&0) {
        indices.insert(0, 0);
    }
    let last = time_axis.len() - 1;
    if !indices.contains(&last) {
        indices.push(last);
    }

    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hourly_axis(hours: &[i64]) -> Vec<String> {
        hours
            .iter()
            .map(|h| format!("2024-01-01T{:02}:00:00Z", h))
            .collect()
    }

    #[test]
    fn test_empty_axis_yields_no_indices() {
        assert!(marker_indices(&[], 2).is_empty());
    }

    #[test]
    fn test_interval_selection_forces_last_index() {
        let axis = hourly_axis(&[0, 1, 2, 3]);
        assert_eq!(marker_indices(&axis, 2), vec![0, 2, 3]);
    }

    #[test]
    fn test_boundaries_always_present() {
        for interval in [1, 2, 5, 7, 100] {
            let axis = hourly_axis(&[0, 1, 2, 3, 4, 5]);
            let indices = marker_indices(&axis, interval);
            assert!(indices.contains(&0), "interval {}", interval);
            assert!(indices.contains(&(axis.len() - 1)), "interval {}", interval);
        }
    }

    #[test]
    fn test_single_entry_axis() {
        let axis = hourly_axis(&[0]);
        assert_eq!(marker_indices(&axis, 6), vec![0]);
    }

    #[test]
    fn test_unparseable_entries_are_skipped() {
        let axis = vec![
            "2024-01-01T00:00:00Z".to_string(),
            "not a timestamp".to_string(),
            "2024-01-01T02:00:00Z".to_string(),
        ];
        assert_eq!(marker_indices(&axis, 2), vec![0, 2]);
    }

    #[test]
    fn test_unparseable_reference_degrades_to_boundaries() {
        let axis = vec![
            "broken".to_string(),
            "2024-01-01T01:00:00Z".to_string(),
            "2024-01-01T02:00:00Z".to_string(),
        ];
        assert_eq!(marker_indices(&axis, 1), vec![0, 2]);
    }

    #[test]
    fn test_zero_interval_degrades_to_boundaries() {
        let axis = hourly_axis(&[0, 1, 2]);
        assert_eq!(marker_indices(&axis, 0), vec![0, 2]);
    }

    #[test]
    fn test_space_separated_axis_entries_still_sample() {
        let axis = vec![
            "2024-01-01 00:00:00 UTC".to_string(),
            "2024-01-01 02:00:00 UTC".to_string(),
        ];
        assert_eq!(marker_indices(&axis, 2), vec![0, 1]);
    }

    #[test]
    fn test_interval_for_device_class() {
        let sampling = SamplingConfig {
            coarse_interval_hours: 6,
            fine_interval_hours: 2,
        };
        assert_eq!(interval_for(DeviceClass::Coarse, &sampling), 6);
        assert_eq!(interval_for(DeviceClass::Fine, &sampling), 2);
        assert_eq!(interval_for(DeviceClass::from_param("coarse"), &sampling), 6);
        assert_eq!(interval_for(DeviceClass::from_param("desktop"), &sampling), 2);
    }
}
