//! Error types for the chat-completion gateway.

use thiserror::Error;

/// Errors that can occur while requesting a completion.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// No API credential was configured for this process
    #[error("AI_GATEWAY_API_KEY is not configured")]
    MissingCredential,

    /// Upstream rejected the request with 429
    #[error("gateway rate limit exceeded")]
    RateLimited,

    /// Upstream rejected the request with 402
    #[error("gateway quota exhausted")]
    QuotaExhausted,

    /// Any other non-success upstream status
    #[error("gateway returned status {status}")]
    Upstream { status: u16, body: String },

    /// Network/HTTP request failed
    #[error("network error: {message}")]
    Network { message: String },
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        GatewayError::Network {
            message: err.to_string(),
        }
    }
}
