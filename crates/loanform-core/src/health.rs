use axum::{Router, http::StatusCode, routing::get};

/// Handler for `GET /healthz` — the process is up and serving.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Handler for `GET /readyz`. Services holding only in-memory state are ready
/// as soon as they are listening.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}

/// Liveness and readiness routes, merged into a service router with
/// `.merge(health_routes())`.
pub fn health_routes<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
}
