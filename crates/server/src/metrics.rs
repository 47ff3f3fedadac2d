use axum::{extract::Request, http::StatusCode, middleware::Next, response::Response};
use once_cell::sync::Lazy;
use prometheus::{register_int_counter, Encoder, IntCounter, TextEncoder};

// Prometheus metrics (default registry)
pub static REQUESTS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("scheduler_requests_total", "Total HTTP requests handled")
        .expect("register requests_total")
});

pub static FORBIDDEN_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "scheduler_forbidden_total",
        "Requests rejected by the capability gate"
    )
    .expect("register forbidden_total")
});

pub static UNAUTHENTICATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "scheduler_unauthenticated_total",
        "Requests rejected for a missing or invalid bearer token"
    )
    .expect("register unauthenticated_total")
});

pub static APPOINTMENTS_WRITTEN_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "scheduler_appointments_written_total",
        "Appointments created or replaced"
    )
    .expect("register appointments_written_total")
});

pub fn encode_metrics() -> (StatusCode, String) {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        return (StatusCode::INTERNAL_SERVER_ERROR, format!("metrics encode error: {e}"));
    }
    (StatusCode::OK, String::from_utf8(buffer).unwrap_or_default())
}

pub async fn metrics_handler() -> (StatusCode, String) {
    encode_metrics()
}

/// Middleware: count every request.
pub async fn track_requests(req: Request, next: Next) -> Response {
    REQUESTS_TOTAL.inc();
    next.run(req).await
}
