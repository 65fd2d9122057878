//! Health endpoints for service monitoring.
//!
//! The root endpoint returns the minimal payload the voice platform pings;
//! `/health` adds timing and version information for orchestration probes.
//! Neither touches external dependencies: the only downstream, the content
//! store, is queried fail-soft and its availability never gates readiness.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

/// Health payload returned on the root endpoint.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Human-readable service description.
    pub message: &'static str,
}

/// Root health endpoint.
#[instrument(name = "root_health")]
pub async fn root_health() -> Response {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            message: "voxtrack delivery lookup service is running",
        }),
    )
        .into_response()
}

/// Probe payload with timing and version information.
#[derive(Debug, Serialize)]
pub struct ProbeResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Timestamp when the check was performed.
    pub timestamp: DateTime<Utc>,
    /// Service version.
    pub version: &'static str,
}

/// Probe endpoint for orchestration systems and load balancers.
///
/// Called frequently, so it performs no expensive operations.
#[instrument(name = "health_check")]
pub async fn health_check() -> Response {
    debug!("performing health check");

    (
        StatusCode::OK,
        Json(ProbeResponse {
            status: "ok",
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
        .into_response()
}
