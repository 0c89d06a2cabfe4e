// HTTP request handlers
use crate::application::sampling::DeviceClass;
use crate::domain::record::MeasurementMode;
use crate::infrastructure::ndjson_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ChartQuery {
    pub units: Option<String>,
    pub device: Option<String>,
}

#[derive(Deserialize)]
pub struct DetailQuery {
    pub units: Option<String>,
    /// Display name of the selected buoy, passed through into the
    /// detail context.
    pub name: Option<String>,
}

fn measurement_mode(units: Option<&str>) -> MeasurementMode {
    MeasurementMode::from_param(units.unwrap_or(""))
}

fn bad_gateway(context: &str, e: anyhow::Error) -> axum::response::Response {
    tracing::error!("{}: {:#}", context, e);
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": "upstream data API unavailable" })),
    )
        .into_response()
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List buoys for the map layer
pub async fn list_buoys(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.buoy_service.list_buoys().await {
        Ok(buoys) => Json(buoys).into_response(),
        Err(e) => bad_gateway("Error listing buoys", e),
    }
}

/// Detail panel context for one buoy
pub async fn buoy_detail(
    Path(id): Path<u32>,
    Query(query): Query<DetailQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mode = measurement_mode(query.units.as_deref());

    match state.detail_service.buoy_detail(id, mode, query.name).await {
        Ok(context) => Json(context).into_response(),
        Err(e) => bad_gateway("Error building buoy detail", e),
    }
}

/// Full chart bundle for one buoy
pub async fn chart_data(
    Path(id): Path<u32>,
    Query(query): Query<ChartQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mode = measurement_mode(query.units.as_deref());
    let device = DeviceClass::from_param(query.device.as_deref().unwrap_or(""));

    match state.chart_service.chart_data(id, mode, device).await {
        Ok(payload) => Json(payload).into_response(),
        Err(e) => bad_gateway("Error building chart data", e),
    }
}

/// Progressive chart bundle for one buoy (NDJSON)
pub async fn stream_chart_data(
    Path(id): Path<u32>,
    Query(query): Query<ChartQuery>,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let mode = measurement_mode(query.units.as_deref());
    let device = DeviceClass::from_param(query.device.as_deref().unwrap_or(""));

    let rx = state
        .streaming_service
        .stream_chart_data(id, mode, device)
        .await;
    stream_from_receiver(rx).await
}
