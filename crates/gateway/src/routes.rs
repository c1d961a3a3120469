//! Route configuration.

use axum::Router;

use crate::handlers::{bid_routes, health_routes, tender_routes};
use crate::state::AppState;

/// Create the main router with all routes under `/api`.
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(health_routes())
        .merge(tender_routes())
        .merge(bid_routes());

    Router::new().nest("/api", api).with_state(state)
}
