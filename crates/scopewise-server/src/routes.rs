//! Route definitions for the HTTP API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

/// Create the API router. Admin handlers check the bearer token themselves
/// through the [`crate::auth::Admin`] extractor.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/estimate", post(handlers::estimate))
        .route("/api/report", post(handlers::report))
        .route("/api/share", post(handlers::share))
        .route(
            "/api/submissions",
            post(handlers::create_submission).get(handlers::list_submissions),
        )
        .route("/api/submissions/{id}", delete(handlers::delete_submission))
        .route("/api/contact", post(handlers::create_contact))
        .route(
            "/api/partner-applications",
            post(handlers::create_application).get(handlers::list_applications),
        )
        .route(
            "/api/partner-applications/{id}/approve",
            post(handlers::approve_application),
        )
        .route(
            "/api/partner-applications/{id}/reject",
            post(handlers::reject_application),
        )
        .route("/api/partners", get(handlers::list_partners))
        .route(
            "/api/partners/{id}/inquiries",
            post(handlers::create_partner_inquiry),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
