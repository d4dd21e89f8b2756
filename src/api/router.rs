//! Router assembly

use axum::Router;
use axum::routing::get;

use super::state::AppState;
use super::{health, v1};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        .route("/ready", get(health::ready_check))
        .nest("/v1", v1::create_v1_router())
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}
