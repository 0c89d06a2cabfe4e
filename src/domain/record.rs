// Telemetry record domain model and unit-system selection
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Reserved "no observation" value used by the upstream feed. Distinct
/// from zero and from JSON null, which the feed also emits.
pub const MISSING_SENTINEL: f64 = -9999.0;

/// Marker shown in place of a missing observation in textual displays.
pub const MISSING_MARKER: &str = "-";

/// True when a raw value carries no observation, either because the
/// field was null or because it holds the sentinel exactly.
pub fn is_missing(value: Option<f64>) -> bool {
    match value {
        Some(raw) => raw == MISSING_SENTINEL,
        None => true,
    }
}

/// Which of the two parallel unit systems to read from each record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasurementMode {
    #[default]
    Metric,
    Imperial,
}

impl MeasurementMode {
    /// Case-sensitive: only the literal "IMPERIAL" selects imperial;
    /// every other value falls back to metric.
    pub fn from_param(raw: &str) -> Self {
        match raw {
            "IMPERIAL" => MeasurementMode::Imperial,
            _ => MeasurementMode::Metric,
        }
    }
}

/// One raw observation as delivered by the upstream API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelemetryRecord {
    #[serde(default)]
    pub buoy_id: Option<u32>,
    #[serde(default)]
    pub variable_id: Option<u32>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub value_metric: Option<f64>,
    #[serde(default)]
    pub value_imperial: Option<f64>,
    #[serde(default)]
    pub unit_metric: String,
    #[serde(default)]
    pub unit_imperial: String,
    #[serde(default)]
    pub cardinal_direction: Option<String>,
    #[serde(default)]
    pub variable_name: Option<String>,
    #[serde(default)]
    pub variable_desc: Option<String>,
    #[serde(default)]
    pub variable_order: Option<i32>,
    #[serde(default)]
    pub lat_label: Option<String>,
    #[serde(default)]
    pub lon_label: Option<String>,
}

impl TelemetryRecord {
    /// A record without a timestamp or a variable id cannot be placed
    /// on the time axis and is dropped silently.
    pub fn is_usable(&self) -> bool {
        self.timestamp.is_some() && self.variable_id.is_some()
    }

    fn raw_value(&self, mode: MeasurementMode) -> Option<f64> {
        match mode {
            MeasurementMode::Imperial => self.value_imperial,
            MeasurementMode::Metric => self.value_metric,
        }
    }

    pub fn unit(&self, mode: MeasurementMode) -> &str {
        match mode {
            MeasurementMode::Imperial => &self.unit_imperial,
            MeasurementMode::Metric => &self.unit_metric,
        }
    }

    /// Numeric value for chart series. Missing observations become NaN
    /// so the chart renderer breaks the line instead of plotting them.
    pub fn series_value(&self, mode: MeasurementMode) -> f64 {
        let raw = self.raw_value(mode);
        if is_missing(raw) {
            f64::NAN
        } else {
            raw.unwrap_or(f64::NAN)
        }
    }

    /// Textual value for the detail panel: the number as-is, or the
    /// dash marker when there is no observation.
    pub fn display_value(&self, mode: MeasurementMode) -> DisplayValue {
        let raw = self.raw_value(mode);
        if is_missing(raw) {
            DisplayValue::Missing
        } else {
            DisplayValue::Number(raw.unwrap_or(f64::NAN))
        }
    }
}

/// A resolved display value: either a number or the dash marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayValue {
    Number(f64),
    Missing,
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Number(value) => write!(f, "{}", value),
            DisplayValue::Missing => write!(f, "{}", MISSING_MARKER),
        }
    }
}

impl Serialize for DisplayValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
