// Application state for HTTP handlers
use crate::application::buoy_service::BuoyService;
use crate::application::chart_service::ChartService;
use crate::application::detail_service::DetailService;
use crate::application::streaming_service::StreamingChartService;

#[derive(Clone)]
pub struct AppState {
    pub buoy_service: BuoyService,
    pub detail_service: DetailService,
    pub chart_service: ChartService,
    pub streaming_service: StreamingChartService,
}
