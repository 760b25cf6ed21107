//! Shared application state and wire types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::catalog::Catalog;
use crate::config::Cli;
use crate::gateway::{GatewayClient, GatewayConfig};
use crate::soc::{SocClient, SocConfig};

/// Shared state handed to every request handler.
pub struct AppState {
    /// Static course table used by the rule-based responder.
    pub catalog: Catalog,
    /// Client for the Schedule of Classes catalog API.
    pub soc: SocClient,
    /// Client for the chat-completion gateway.
    pub gateway: GatewayClient,
}

impl AppState {
    /// Builds the app state from the parsed command line.
    ///
    /// Two HTTP clients are built: the catalog client carries a total request
    /// timeout, while the gateway client only bounds the connect phase so that
    /// long-lived completion streams are not cut off mid-reply.
    pub fn from_config(cli: &Cli) -> anyhow::Result<Self> {
        let soc_http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;

        let gateway_http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            catalog: Catalog::embedded(),
            soc: SocClient::new(
                soc_http,
                SocConfig {
                    base_url: cli.soc_url.trim_end_matches('/').to_string(),
                },
            ),
            gateway: GatewayClient::new(
                gateway_http,
                GatewayConfig {
                    base_url: cli.gateway_url.trim_end_matches('/').to_string(),
                    model: cli.model.clone(),
                    api_key: cli.api_key.clone(),
                },
            ),
        })
    }
}

/// The fixed set of campus selector values exposed to clients.
///
/// Unknown values fall back to `All`, which scopes catalog queries to the
/// default campus code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Campus {
    #[default]
    All,
    NewBrunswick,
    Newark,
    Camden,
}

impl Campus {
    /// Parses a client-facing campus value, case-insensitively.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "new brunswick" => Campus::NewBrunswick,
            "newark" => Campus::Newark,
            "camden" => Campus::Camden,
            _ => Campus::All,
        }
    }

    /// The client-facing name of this campus.
    pub fn name(&self) -> &'static str {
        match self {
            Campus::All => "all",
            Campus::NewBrunswick => "New Brunswick",
            Campus::Newark => "Newark",
            Campus::Camden => "Camden",
        }
    }

    /// The campus code used by the Schedule of Classes API.
    ///
    /// "all" has no catalog counterpart and maps to the New Brunswick code.
    pub fn soc_code(&self) -> &'static str {
        match self {
            Campus::Newark => "NK",
            Campus::Camden => "CM",
            Campus::NewBrunswick | Campus::All => "NB",
        }
    }
}

impl From<String> for Campus {
    fn from(value: String) -> Self {
        Campus::parse(&value)
    }
}

impl From<Campus> for String {
    fn from(value: Campus) -> Self {
        value.name().to_string()
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role tag on a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

/// A single message in a conversation, as sent on the wire.
///
/// Clients may attach ids and timestamps to their own message objects; only
/// the role/content pair is meaningful to the service and forwarded upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}
