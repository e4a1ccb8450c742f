//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the JSON document API and the health probe under a
//! single Axum router, with permissive CORS for the browser editor and
//! request tracing.

pub mod resumes;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/resumes", get(resumes::list_resumes).post(resumes::create_resume))
        .route(
            "/api/resumes/{id}",
            get(resumes::get_resume)
                .patch(resumes::update_resume)
                .delete(resumes::delete_resume),
        )
        .route("/healthz", get(healthz))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
