//! Prometheus request metrics and the `/metrics` exposition route.
//!
//! | Metric                          | Type      | Labels                 |
//! |---------------------------------|-----------|------------------------|
//! | `http_request_duration_seconds` | histogram | method, path, status   |
//! | `http_request_count_total`      | counter   | method, path, status   |
//!
//! `path` is the matched route template (`/v0/inventory/price/{key}`), so
//! label cardinality stays bounded by the router. Unrouted requests share
//! the `unmatched` path.

use std::sync::OnceLock;

use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use tracing::error;

/// Path label for requests no route matched.
pub const UNMATCHED_PATH: &str = "unmatched";

const LABELS: [&str; 3] = ["method", "path", "status"];

#[derive(Debug)]
struct HttpMetrics {
    registry: Registry,
    request_count: IntCounterVec,
    request_duration: HistogramVec,
}

static HTTP_METRICS: OnceLock<Option<HttpMetrics>> = OnceLock::new();

fn metrics() -> Option<&'static HttpMetrics> {
    HTTP_METRICS.get_or_init(build_metrics).as_ref()
}

fn build_metrics() -> Option<HttpMetrics> {
    match try_build_metrics() {
        Ok(metrics) => Some(metrics),
        Err(source) => {
            error!("failed to set up request metrics: {source}");
            None
        }
    }
}

fn try_build_metrics() -> prometheus::Result<HttpMetrics> {
    let registry = Registry::new();

    let request_count = IntCounterVec::new(
        Opts::new(
            "http_request_count_total",
            "HTTP requests served, by method, route and status code.",
        ),
        &LABELS,
    )?;

    let request_duration = HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds, by method, route and status code.",
        )
        .buckets(vec![
            0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
        ]),
        &LABELS,
    )?;

    registry.register(Box::new(request_count.clone()))?;
    registry.register(Box::new(request_duration.clone()))?;

    Ok(HttpMetrics {
        registry,
        request_count,
        request_duration,
    })
}

/// Records one served request.
pub fn observe_request(method: &str, path: &str, status: u16, duration_seconds: f64) {
    let Some(metrics) = metrics() else {
        return;
    };

    let status = status.to_string();
    let labels = [method, path, status.as_str()];

    metrics.request_count.with_label_values(&labels).inc();
    metrics
        .request_duration
        .with_label_values(&labels)
        .observe(duration_seconds);
}

/// Renders every registered metric in the Prometheus text format.
pub fn render() -> Result<String, String> {
    let metrics = metrics().ok_or_else(|| "request metrics unavailable".to_string())?;

    let mut encoded = Vec::new();
    TextEncoder::new()
        .encode(&metrics.registry.gather(), &mut encoded)
        .map_err(|source| source.to_string())?;

    String::from_utf8(encoded).map_err(|source| source.to_string())
}

/// `GET /metrics`
pub async fn metrics_handler() -> Response {
    match render() {
        Ok(body) => {
            let content_type = TextEncoder::new().format_type().to_string();
            ([(CONTENT_TYPE, content_type)], body).into_response()
        }
        Err(message) => {
            error!("failed to encode metrics response: {message}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observed_requests_are_rendered() {
        observe_request("GET", "/v0/orders", 200, 0.004);
        observe_request("POST", "/v0/inventory/items/purchase", 401, 0.001);

        let text = render().unwrap();
        assert!(text.contains("# TYPE http_request_count_total counter"));
        assert!(text.contains("# TYPE http_request_duration_seconds histogram"));
        assert!(text.contains(
            r#"http_request_count_total{method="POST",path="/v0/inventory/items/purchase",status="401"}"#
        ));
        assert!(text.contains(
            r#"http_request_duration_seconds_bucket{method="GET",path="/v0/orders",status="200",le="0.005"}"#
        ));
    }
}
