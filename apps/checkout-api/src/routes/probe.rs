//! Liveness and readiness endpoints.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use super::{SERVICE_NAME, SERVICE_VERSION};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    pub service: &'static str,
    pub version: &'static str,
}

/// Health report. `failures` is empty when every dependency answered.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub service: &'static str,
    pub version: &'static str,
    pub failures: Vec<String>,
}

/// `GET /status`
pub async fn status() -> Json<StatusResponse> {
    Json(StatusResponse {
        message: "OK",
        service: SERVICE_NAME,
        version: SERVICE_VERSION,
    })
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let mut failures = Vec::new();

    if let Err(err) = state.pipeline.ping().await {
        tracing::warn!(error = %err, "Health probe failed");
        failures.push(format!("inventory store: {}", err));
    }

    let status = if failures.is_empty() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(HealthReport {
            service: SERVICE_NAME,
            version: SERVICE_VERSION,
            failures,
        }),
    )
}
