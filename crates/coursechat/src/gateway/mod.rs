//! Chat-completion gateway integration.

mod client;
mod error;

pub use client::{GatewayClient, GatewayConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use error::GatewayError;
