// Buoy detail panel context
use super::buoy::BuoyLogo;
use super::record::{DisplayValue, MeasurementMode};
use serde::Serialize;

/// One latest-observation row of the detail panel, resolved for the
/// active unit mode.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailReading {
    pub variable_id: u32,
    pub label: String,
    pub value: DisplayValue,
    pub unit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cardinal_direction: Option<String>,
    /// Arrow-glyph bearing, present only for the wind-direction row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_bearing: Option<f64>,
}

/// Normalized context the templating layer renders into the detail
/// panel. The template engine itself lives outside this service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuoyDetailContext {
    pub buoy_id: u32,
    pub buoy_name: String,
    pub measurement_mode: MeasurementMode,
    pub readings: Vec<DetailReading>,
    /// "YYYY-MM-DD HH:MM UTC", or empty when the upstream stamp is
    /// unavailable.
    pub last_time_stamp: String,
    pub last_buoy_time_stamp: String,
    /// Preformatted position labels from the upstream feed.
    pub lat_label: String,
    pub lon_label: String,
    pub logos: Vec<BuoyLogo>,
}
