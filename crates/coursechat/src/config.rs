//! Process configuration.
//!
//! Everything is settable from the command line or the environment, with a
//! `.env` file loaded first. The gateway credential is optional at startup:
//! the service comes up without it, and chat requests fail with a
//! configuration error until it is provided.

use clap::Parser;
use std::net::SocketAddr;

use crate::gateway;
use crate::soc;

#[derive(Debug, Parser)]
#[command(name = "coursechat", version, about = "Course assistant chat service")]
pub struct Cli {
    /// Socket address to bind the server to
    #[arg(long, env = "COURSECHAT_ADDR", default_value = "0.0.0.0:8080")]
    pub addr: SocketAddr,

    /// Base URL of the Schedule of Classes API
    #[arg(long, env = "SOC_BASE_URL", default_value = soc::SOC_BASE_URL)]
    pub soc_url: String,

    /// Base URL of the chat-completion gateway
    #[arg(long, env = "AI_GATEWAY_URL", default_value = gateway::DEFAULT_BASE_URL)]
    pub gateway_url: String,

    /// Model identifier requested from the gateway
    #[arg(long, env = "AI_GATEWAY_MODEL", default_value = gateway::DEFAULT_MODEL)]
    pub model: String,

    /// Credential for the chat-completion gateway
    #[arg(long, env = "AI_GATEWAY_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,
}
