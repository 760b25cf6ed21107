//! Error types for the Schedule of Classes client.

use thiserror::Error;

/// Errors that can occur while querying the SOC catalog.
///
/// Callers treat all of these as degradable: a failed catalog lookup turns
/// into a "no live data" note, never a failed request.
#[derive(Debug, Error)]
pub enum SocError {
    /// Network/HTTP request failed
    #[error("network error: {message}")]
    Network { message: String },

    /// Catalog returned a non-success status
    #[error("SOC API returned status {status}")]
    UnexpectedStatus { status: u16 },

    /// Request URL could not be constructed
    #[error("invalid SOC URL: {message}")]
    Url { message: String },

    /// Payload was JSON but not in the expected shape
    #[error("undecodable SOC payload: {message}")]
    Decode { message: String },
}

impl From<reqwest::Error> for SocError {
    fn from(err: reqwest::Error) -> Self {
        SocError::Network {
            message: err.to_string(),
        }
    }
}

impl From<url::ParseError> for SocError {
    fn from(err: url::ParseError) -> Self {
        SocError::Url {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for SocError {
    fn from(err: serde_json::Error) -> Self {
        SocError::Decode {
            message: err.to_string(),
        }
    }
}
