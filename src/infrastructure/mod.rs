// Infrastructure layer - External dependencies and adapters
pub mod buoy_api_repository;
pub mod config;
pub mod ndjson_stream;
