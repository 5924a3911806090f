// Application layer - Use cases over the metrics repository
pub mod dashboard_service;
pub mod enso_service;
pub mod metrics_repository;
