pub mod stats_service;
pub mod upload_service;
