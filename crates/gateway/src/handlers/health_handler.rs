//! Liveness check.

use axum::{routing::get, Router};

use crate::state::AppState;

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/ping", get(ping))
}

/// Always answers `ok` while the process is serving.
pub async fn ping() -> &'static str {
    "ok"
}
