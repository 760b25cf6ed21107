use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::server::types::{ApiError, CourseListParams};
use crate::types::{AppState, Campus};

/// GET /courses
/// Returns the static catalog, optionally filtered by campus.
pub async fn get_courses(
    State(s): State<Arc<AppState>>,
    Query(params): Query<CourseListParams>,
) -> Response {
    let campus = params.campus.unwrap_or(Campus::All);
    info!(campus = %campus, "GET /courses");

    let courses = s.catalog.by_campus(campus);
    (StatusCode::OK, Json(courses)).into_response()
}

/// GET /courses/:code
pub async fn get_course(Path(code): Path<String>, State(s): State<Arc<AppState>>) -> Response {
    info!(code = %code, "GET /courses/{}", code);

    match s.catalog.get_by_code(&code) {
        Some(course) => (StatusCode::OK, Json(course)).into_response(),
        None => ApiError {
            status: StatusCode::NOT_FOUND,
            message: format!("No course with code: {code}"),
            detail: None,
        }
        .into_response(),
    }
}

/// GET /suggestions
/// Fixed starter prompts for an empty conversation.
pub async fn get_suggestions() -> Response {
    let suggestions = [
        "What is CS 111?",
        "Prerequisites for CS 112",
        "Compare CS 111 and CS 112",
        "CS courses in Newark",
    ];
    (StatusCode::OK, Json(json!(suggestions))).into_response()
}
