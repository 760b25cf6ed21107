//! POST /chat - the course-context proxy.
//!
//! Flow per request: require the gateway credential, look up live course
//! data for the latest user message (degrading gracefully on any catalog
//! failure), build the system prompt, then forward the full history to the
//! gateway and relay the streamed reply.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::gateway::GatewayError;
use crate::server::types::{ApiError, ChatRequest};
use crate::server::util::{generate_correlation_id, relay_stream};
use crate::soc;
use crate::types::{AppState, Campus, ChatMessage};

const LIVE_DATA_NOTE: &str =
    "\n\n[Data retrieved from official Rutgers Schedule of Classes API]";

const NO_DATA_NOTE: &str = "\n\n[Note: Could not retrieve live data from Rutgers Schedule \
     of Classes. Providing general guidance - please verify information at \
     https://sims.rutgers.edu/webreg/ before registration]";

/// POST /chat
pub async fn post_chat(
    State(s): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let correlation_id = generate_correlation_id();

    if !s.gateway.is_configured() {
        warn!(correlation_id = %correlation_id, "chat request without configured credential");
        return ApiError::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "AI_GATEWAY_API_KEY is not configured",
        ))
        .into_response();
    }

    let query = req
        .messages
        .last()
        .map(|m| m.content.clone())
        .unwrap_or_default();
    info!(
        correlation_id = %correlation_id,
        campus = %req.campus,
        query = %query,
        "processing chat query"
    );

    // A catalog failure never fails the request; it degrades to the
    // "no live data" notice.
    let courses = match s.soc.search_courses(&query, req.campus).await {
        Ok(courses) => courses,
        Err(e) => {
            warn!(
                correlation_id = %correlation_id,
                error = %e,
                "SOC lookup failed, continuing without live data"
            );
            Vec::new()
        }
    };
    info!(
        correlation_id = %correlation_id,
        count = courses.len(),
        "live course records retrieved"
    );

    let course_context = soc::format_for_context(&courses);
    let system_prompt = build_system_prompt(req.campus, &course_context);

    let mut messages = Vec::with_capacity(req.messages.len() + 1);
    messages.push(ChatMessage::system(system_prompt));
    messages.extend(req.messages);

    match s.gateway.stream_chat(&messages).await {
        Ok(upstream) => relay_stream(upstream),
        Err(GatewayError::RateLimited) => ApiError::from((
            StatusCode::TOO_MANY_REQUESTS,
            "Rate limit exceeded. Please try again in a moment.",
        ))
        .into_response(),
        Err(GatewayError::QuotaExhausted) => ApiError::from((
            StatusCode::PAYMENT_REQUIRED,
            "Service temporarily unavailable. Please try again later.",
        ))
        .into_response(),
        Err(GatewayError::MissingCredential) => ApiError::from((
            StatusCode::INTERNAL_SERVER_ERROR,
            "AI_GATEWAY_API_KEY is not configured",
        ))
        .into_response(),
        Err(e) => {
            error!(correlation_id = %correlation_id, error = %e, "completion request failed");
            ApiError::from((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate response",
                Some(e.to_string()),
            ))
            .into_response()
        }
    }
}

/// Builds the system instruction for the completion request.
///
/// States the assistant's role and sourcing rules, embeds the campus
/// context, and embeds either the live course block or an explicit
/// no-live-data notice.
pub fn build_system_prompt(campus: Campus, course_context: &str) -> String {
    let campus_context = match campus {
        Campus::All => "all campuses".to_string(),
        other => other.name().to_string(),
    };

    let (data_block, data_source_note) = if course_context.is_empty() {
        (
            "NO LIVE DATA AVAILABLE - Provide general guidance only".to_string(),
            NO_DATA_NOTE,
        )
    } else {
        (
            format!("LIVE COURSE DATA FROM RUTGERS SOC:\n{course_context}"),
            LIVE_DATA_NOTE,
        )
    };

    format!(
        "You are the official Rutgers University Course Assistant. You help students with \
         course information, prerequisites, scheduling, and academic planning.\n\n\
         CRITICAL DATA SOURCE RULES:\n\
         1. ONLY use data from the official Rutgers Schedule of Classes (SOC) or course catalog\n\
         2. If live data was retrieved, use ONLY that data for specific course details\n\
         3. If no live data is available, clearly state that you cannot verify current information\n\
         4. NEVER fabricate professor names, exact section times, or room numbers\n\
         5. NEVER use third-party sources (RateMyProfessor, Reddit, unofficial sites)\n\
         6. Always encourage students to verify at sims.rutgers.edu/webreg before registration\n\n\
         RESPONSE FORMAT:\n\
         - Use clear bullet points for course information\n\
         - Include course codes in format: SUBJECT:NUMBER (e.g., 198:111)\n\
         - Mention credits, prerequisites when known\n\
         - Be concise but informative\n\
         - Use neutral, academic tone\n\
         - No emojis, no slang\n\
         - If uncertain, clearly state assumptions\n\n\
         CAMPUS CONTEXT: The user is interested in {campus_context}\n\n\
         {data_block}{data_source_note}"
    )
}
