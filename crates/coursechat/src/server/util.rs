//! Helpers shared by the endpoint handlers.

use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::TryStreamExt;
use rand::Rng;
use tracing::warn;

/// Relays an upstream streamed response to the caller as an event stream.
///
/// The upstream body is wrapped as-is; bytes flow through unmodified. When
/// the caller disconnects, axum stops polling and drops the stream, which
/// aborts the upstream connection.
pub fn relay_stream(upstream: reqwest::Response) -> Response {
    let stream = upstream
        .bytes_stream()
        .inspect_err(|e| warn!(error = %e, "upstream stream ended with error"));

    (
        [(header::CONTENT_TYPE, "text/event-stream")],
        Body::from_stream(stream),
    )
        .into_response()
}

/// Generates a unique correlation ID for request tracing.
pub fn generate_correlation_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_micros();
    let random: u32 = rand::thread_rng().gen();
    format!("{:x}-{:08x}", timestamp & 0xFFFFFFFF, random)
}
