use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status ("ok" or "degraded").
    pub status: &'static str,
}

impl HealthResponse {
    /// The catalog store answered its health probe.
    pub fn ok() -> Self {
        Self { status: "ok" }
    }

    /// The catalog store failed its health probe; catalog calls will likely fail.
    pub fn degraded() -> Self {
        Self { status: "degraded" }
    }
}
