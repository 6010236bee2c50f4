use reqwest::StatusCode;
use thiserror::Error;

use crate::Provider;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0} credential is not configured")]
    MissingCredential(Provider),
    #[error("invalid gateway configuration: {0}")]
    Config(String),
    #[error("no response received from the completion service")]
    EmptyResponse,
    #[error("completion service error ({status}): {message}")]
    Upstream { status: StatusCode, message: String },
    #[error("completion service request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("unexpected completion service reply: {0}")]
    Decode(String),
}
