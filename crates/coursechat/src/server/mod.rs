use std::sync::Arc;

use axum::http::header::{HeaderName, AUTHORIZATION, CONTENT_TYPE};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::endpoints::{chat, courses, respond, status};
use crate::types::AppState;

pub mod endpoints;
pub mod types;
mod util;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    // Browser clients talk to the service directly; preflights get
    // permissive cross-origin headers and no body.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new()
        .route("/health", get(status::get_health))
        .route("/chat", post(chat::post_chat))
        .route("/respond", post(respond::post_respond))
        .route("/courses", get(courses::get_courses))
        .route("/courses/:code", get(courses::get_course))
        .route("/suggestions", get(courses::get_suggestions))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}
