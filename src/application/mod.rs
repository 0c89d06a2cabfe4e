// Application layer - Use cases and the normalization pipeline
pub mod buoy_service;
pub mod chart_service;
pub mod detail_service;
pub mod sampling;
pub mod series_builder;
pub mod streaming_service;
pub mod telemetry_repository;
