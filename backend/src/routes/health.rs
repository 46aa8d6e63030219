//! Health and landing endpoints
//!
//! - `/` returns the application banner
//! - `/health` reports that the process is up
//! - `/health/ready` checks the database and answers 503 when it is down
//! - `/health/live` always answers 200 while the server runs

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;

/// Banner served at the root path
pub const BANNER: &str = "My Movie Application";

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<CheckStatus>,
}

impl HealthResponse {
    fn new(status: &'static str, database: Option<CheckStatus>) -> Self {
        Self {
            status,
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            database,
        }
    }
}

/// Status of the database dependency
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub healthy: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// GET /
pub async fn home() -> Json<&'static str> {
    Json(BANNER)
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("healthy", None))
}

/// Readiness probe; 503 if the database does not answer
pub async fn readiness_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    match db::health_check(state.db()).await {
        Ok(()) => Ok(Json(HealthResponse::new(
            "ready",
            Some(CheckStatus {
                healthy: true,
                message: None,
            }),
        ))),
        Err(e) => {
            warn!(error = %e, "Readiness check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse::new(
                    "not_ready",
                    Some(CheckStatus {
                        healthy: false,
                        message: Some(e.to_string()),
                    }),
                )),
            ))
        }
    }
}

/// GET /health/live
pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new("alive", None))
}
