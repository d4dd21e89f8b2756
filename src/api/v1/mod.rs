//! v1 API surface

pub mod decision;

use axum::Router;
use axum::routing::get;

use super::state::AppState;

pub fn create_v1_router() -> Router<AppState> {
    Router::new().route("/experiments/{experiment_id}/decision", get(decision::decide))
}
