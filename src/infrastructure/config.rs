use crate::domain::record::MeasurementMode;
use serde::Deserialize;

/// Default series colors, assigned by position when a variable has no
/// explicit color configured.
pub const COLOR_PALETTE: &[&str] = &[
    "#FEB019", "#008FFB", "#00E396", "#FF4560", "#775DD0", "#546E7A", "#26A69A",
    "#D32F2F", "#7E57C2", "#8D6E63",
];

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    pub upstream: UpstreamSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub api_key: String,
    /// Site tag this deployment serves; buoy listings are filtered to it.
    pub site: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    /// Width of the chart window ending at the buoy's last report.
    pub chart_window_hours: i64,
    /// Fixed display-timezone adjustment applied to chart instants and
    /// every label derived from them, never to the canonical axis.
    #[serde(default)]
    pub display_offset_hours: i64,
    /// Variable id whose values populate the wind-direction track.
    pub wind_direction_variable: u32,
    #[serde(default)]
    pub variables: Vec<VariableConfig>,
    pub sampling: SamplingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VariableConfig {
    pub id: u32,
    pub label: String,
    #[serde(default)]
    pub unit_metric: String,
    #[serde(default)]
    pub unit_imperial: String,
    pub color: Option<String>,
    /// Annotate this series' tooltips with the wind direction at the
    /// same axis position.
    #[serde(default)]
    pub show_wind_direction: bool,
}

impl VariableConfig {
    pub fn unit_for(&self, mode: MeasurementMode) -> &str {
        match mode {
            MeasurementMode::Imperial => &self.unit_imperial,
            MeasurementMode::Metric => &self.unit_metric,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SamplingConfig {
    /// Marker interval for narrow viewports.
    pub coarse_interval_hours: i64,
    pub fine_interval_hours: i64,
}

impl DashboardConfig {
    pub fn display_offset_ms(&self) -> i64 {
        self.display_offset_hours * 3_600_000
    }

    /// All variable ids a chart fetch requests: the charted variables
    /// plus the wind-direction variable.
    pub fn tracked_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.variables.iter().map(|v| v.id).collect();
        if !ids.contains(&self.wind_direction_variable) {
            ids.push(self.wind_direction_variable);
        }
        ids
    }

    /// Configured color for a variable, or its palette slot.
    pub fn color_for(&self, variable_id: u32) -> String {
        for (position, variable) in self.variables.iter().enumerate() {
            if variable.id == variable_id {
                return variable
                    .color
                    .clone()
                    .unwrap_or_else(|| COLOR_PALETTE[position % COLOR_PALETTE.len()].to_string());
            }
        }
        COLOR_PALETTE[0].to_string()
    }
}

pub fn load_upstream_config() -> anyhow::Result<UpstreamConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/upstream"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dashboard_config() -> DashboardConfig {
        DashboardConfig {
            chart_window_hours: 48,
            display_offset_hours: 9,
            wind_direction_variable: 10,
            variables: vec![
                VariableConfig {
                    id: 40,
                    label: "Max wave height".to_string(),
                    unit_metric: "m".to_string(),
                    unit_imperial: "ft".to_string(),
                    color: None,
                    show_wind_direction: false,
                },
                VariableConfig {
                    id: 9,
                    label: "Wind speed".to_string(),
                    unit_metric: "m/s".to_string(),
                    unit_imperial: "mph".to_string(),
                    color: Some("#123456".to_string()),
                    show_wind_direction: true,
                },
            ],
            sampling: SamplingConfig {
                coarse_interval_hours: 6,
                fine_interval_hours: 2,
            },
        }
    }

    #[test]
    fn test_tracked_ids_include_wind_direction() {
        assert_eq!(dashboard_config().tracked_ids(), vec![40, 9, 10]);
    }

    #[test]
    fn test_color_for_falls_back_to_palette_slot() {
        let config = dashboard_config();
        assert_eq!(config.color_for(40), COLOR_PALETTE[0]);
        assert_eq!(config.color_for(9), "#123456");
    }
}
