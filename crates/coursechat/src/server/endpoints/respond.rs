use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::info;

use crate::responder;
use crate::server::types::{RespondReply, RespondRequest};
use crate::types::AppState;

/// POST /respond
/// Runs the rule-based responder against the static course table. Always
/// answers; there is no failure path beyond malformed JSON.
pub async fn post_respond(
    State(s): State<Arc<AppState>>,
    Json(req): Json<RespondRequest>,
) -> Response {
    info!(campus = %req.campus, "quick responder query");

    let reply = responder::generate_response(&s.catalog, &req.message, req.campus);
    (StatusCode::OK, Json(RespondReply { reply })).into_response()
}
