/// OpenAPI documentation generation.
pub mod documentation;
/// Catalog rules and the service capability consumed by the routes.
pub mod game_service;
/// Health check service.
pub mod health_service;
