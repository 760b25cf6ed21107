//! HTTP client for the OpenAI-compatible chat-completion gateway.

use reqwest::{Client, StatusCode};
use serde_json::json;
use tracing::error;

use super::error::GatewayError;
use crate::types::ChatMessage;

/// Default gateway endpoint.
pub const DEFAULT_BASE_URL: &str = "https://ai.gateway.lovable.dev/v1";

/// Default model requested from the gateway.
pub const DEFAULT_MODEL: &str = "google/gemini-3-flash-preview";

/// Configuration for the gateway client.
///
/// The credential is injected here at construction rather than read from the
/// environment per request, so tests can swap in fakes. A missing credential
/// is still a per-request configuration error, surfaced by `stream_chat`.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
        }
    }
}

/// Client for streaming chat completions.
pub struct GatewayClient {
    client: Client,
    config: GatewayConfig,
}

impl GatewayClient {
    pub fn new(client: Client, config: GatewayConfig) -> Self {
        Self { client, config }
    }

    /// Whether a credential is available for completion requests.
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    /// Requests a streamed completion for the given message list.
    ///
    /// # Returns
    /// * `Ok(response)` - The upstream response with its body unread, ready to relay
    /// * `Err(GatewayError)` - Missing credential, distinguished 429/402, or other failure
    pub async fn stream_chat(
        &self,
        messages: &[ChatMessage],
    ) -> Result<reqwest::Response, GatewayError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or(GatewayError::MissingCredential)?;

        let body = json!({
            "model": self.config.model,
            "messages": messages,
            "stream": true,
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::TOO_MANY_REQUESTS => Err(GatewayError::RateLimited),
            StatusCode::PAYMENT_REQUIRED => Err(GatewayError::QuotaExhausted),
            status => {
                let body = response.text().await.unwrap_or_default();
                error!(status = status.as_u16(), body = %body, "gateway request failed");
                Err(GatewayError::Upstream {
                    status: status.as_u16(),
                    body,
                })
            }
        }
    }
}
