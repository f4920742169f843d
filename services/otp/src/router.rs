use axum::{Router, routing::post};

use loanform_core::health::health_routes;
use loanform_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::otp::{issue_otp, verify_otp};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // OTP
        .route("/otp", post(issue_otp))
        .route("/otp/verify", post(verify_otp))
        .with_state(state)
        // Health
        .merge(health_routes())
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(request_id_layer())
}
