//! Axum router wiring.
//!
//! One webhook route plus the operational endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, endpoint, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/skill", post(endpoint::skill_request))
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
