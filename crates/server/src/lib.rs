use advisor::AdvisorError;
use api_types::ErrorBody;
use axum::{Json, http::StatusCode, response::IntoResponse};
use gateway::GatewayError;

pub use server::{app, run_with_listener};

mod chat;
mod server;

pub mod types {
    pub mod chat {
        pub use api_types::chat::{ChatReply, ChatRequest};
    }

    pub mod advice {
        pub use api_types::advice::{
            AdviceResponse, CategoryTotals, FinancialAdviceRequest, MetricsView, TransactionInput,
        };
    }
}

/// Failure inside one of the two operations.
#[derive(Debug, thiserror::Error)]
pub enum OperationError {
    #[error(transparent)]
    Advisor(#[from] AdvisorError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// The completion service answered without usable text.
    #[error("{0}")]
    EmptyReply(&'static str),
}

impl OperationError {
    /// Maps an empty gateway reply to the operation's own message.
    pub(crate) fn empty_reply_as(message: &'static str) -> impl Fn(GatewayError) -> Self {
        move |err| match err {
            GatewayError::EmptyResponse => Self::EmptyReply(message),
            other => Self::Gateway(other),
        }
    }
}

#[derive(Debug)]
pub enum ServerError {
    InvalidRequestType,
    RequestParse(serde_json::Error),
    Chat(OperationError),
    Advice(OperationError),
}

const INVALID_REQUEST_TYPE: &str = "Invalid request type";
const REQUEST_FAILED: &str = "Failed to process request";
const CHAT_FAILED: &str = "Failed to process chat request";
const ADVICE_FAILED: &str = "Failed to process financial advice request";

fn message_or(err: &OperationError, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::InvalidRequestType => {
                (StatusCode::BAD_REQUEST, INVALID_REQUEST_TYPE.to_string())
            }
            ServerError::RequestParse(err) => {
                tracing::error!("request processing error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, REQUEST_FAILED.to_string())
            }
            ServerError::Chat(err) => {
                tracing::error!("community chat error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, message_or(&err, CHAT_FAILED))
            }
            ServerError::Advice(err) => {
                tracing::error!("financial advice error: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, message_or(&err, ADVICE_FAILED))
            }
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}
