// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};

use axum::{routing::get, Router};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::application::buoy_service::BuoyService;
use crate::application::chart_service::ChartService;
use crate::application::detail_service::DetailService;
use crate::application::streaming_service::StreamingChartService;
use crate::infrastructure::buoy_api_repository::BuoyApiRepository;
use crate::infrastructure::config::{load_dashboard_config, load_upstream_config};
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    buoy_detail, chart_data, health_check, list_buoys, stream_chart_data,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    // Load configuration
    let upstream_config = load_upstream_config()?;
    let dashboard_config = load_dashboard_config()?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(BuoyApiRepository::new(
        upstream_config.upstream.base_url,
        upstream_config.upstream.api_key,
    ));

    // Create services (application layer)
    let buoy_service = BuoyService::new(repository.clone(), upstream_config.upstream.site);
    let detail_service = DetailService::new(repository.clone(), dashboard_config.clone());
    let chart_service = ChartService::new(repository.clone(), dashboard_config.clone());
    let streaming_service = StreamingChartService::new(repository.clone(), dashboard_config);

    // Create application state
    let state = Arc::new(AppState {
        buoy_service,
        detail_service,
        chart_service,
        streaming_service,
    });

    // Build router (presentation layer)
    // Note: The streaming route is kept outside the compression layer
    // so NDJSON lines flush to the client as they are produced instead
    // of sitting in an encoder buffer.
    let api = Router::new()
        .route("/buoys", get(list_buoys))
        .route("/buoys/:id/detail", get(buoy_detail))
        .route("/buoys/:id/charts", get(chart_data))
        .layer(CompressionLayer::new());

    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/buoys/:id/charts/stream", get(stream_chart_data))
        .merge(api)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = "0.0.0.0:8080".parse().unwrap();
    println!("Starting buoy-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
