//! Request middleware: password check for write routes, access logging and
//! request metrics.

use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::metrics::{self, UNMATCHED_PATH};
use crate::state::AppState;

/// Header carrying the write password.
pub const AUTH_HEADER: &str = "x-auth-password";

/// Rejects requests whose `X-Auth-Password` does not match the configured one.
pub async fn require_password(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = request
        .headers()
        .get(AUTH_HEADER)
        .and_then(|value| value.to_str().ok());

    if !state.password_matches(presented) {
        return Err(ApiError::unauthorized());
    }

    Ok(next.run(request).await)
}

/// Logs one line per request and records it in the request metrics.
/// Client and server errors go out at warn. Scrapes of `/metrics` are
/// neither logged nor counted.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    if path == "/metrics" {
        return next.run(request).await;
    }

    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_PATH, MatchedPath::as_str)
        .to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let elapsed = started.elapsed();
    metrics::observe_request(method.as_str(), &route, status, elapsed.as_secs_f64());

    let elapsed_ms = elapsed.as_millis() as u64;
    if status > 399 {
        warn!(%method, %path, status, elapsed_ms, "Request failed");
    } else {
        debug!(%method, %path, status, elapsed_ms, "Request served");
    }

    response
}
