//! Request/response types shared across endpoints.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use crate::types::{Campus, ChatMessage};

/// A structured error response: `{ "error": <message> }` with the given
/// status. The optional detail is logged, never sent to the client.
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub detail: Option<String>,
}

impl From<(StatusCode, &str)> for ApiError {
    fn from((status, message): (StatusCode, &str)) -> Self {
        Self {
            status,
            message: message.to_string(),
            detail: None,
        }
    }
}

impl From<(StatusCode, &str, Option<String>)> for ApiError {
    fn from((status, message, detail): (StatusCode, &str, Option<String>)) -> Self {
        Self {
            status,
            message: message.to_string(),
            detail,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Some(detail) = &self.detail {
            error!(status = self.status.as_u16(), detail = %detail, "{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Inbound chat submission.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub campus: Campus,
}

/// Inbound rule-responder request.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    pub message: String,
    #[serde(default)]
    pub campus: Campus,
}

/// Rule-responder reply.
#[derive(Debug, Serialize)]
pub struct RespondReply {
    pub reply: String,
}

/// Query parameters for the catalog listing.
#[derive(Debug, Deserialize)]
pub struct CourseListParams {
    pub campus: Option<Campus>,
}
