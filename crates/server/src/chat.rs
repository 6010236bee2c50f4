//! Chat and financial advice API endpoints

use advisor::{
    ADVISOR_SYSTEM_PROMPT, AdviceRequest, COMMUNITY_SYSTEM_PROMPT, Metrics, MissingTotals,
    advice_or_fallback, render_advice_prompt, validate_message,
};
use api_types::{
    advice::{AdviceResponse, CategoryTotals, MetricsView},
    chat::ChatReply,
};
use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use gateway::SamplingParams;
use serde_json::Value;

use crate::{OperationError, ServerError, server::ServerState};

const NO_CHAT_REPLY: &str = "No response received from completion service";
const NO_ADVICE: &str = "No advice generated";

/// Operation selected by the `type` field of a chat body.
#[derive(Debug, PartialEq, Eq)]
enum RequestType {
    CommunityChat,
    FinancialAdvice,
}

impl RequestType {
    fn of(body: &Value) -> Result<Self, ServerError> {
        match body.get("type") {
            None | Some(Value::Null) => Ok(Self::CommunityChat),
            Some(Value::String(kind)) => match kind.as_str() {
                "" | "community-chat" => Ok(Self::CommunityChat),
                "financial-advice" => Ok(Self::FinancialAdvice),
                _ => Err(ServerError::InvalidRequestType),
            },
            Some(_) => Err(ServerError::InvalidRequestType),
        }
    }
}

fn parse_body(body: &Bytes) -> Result<Value, ServerError> {
    serde_json::from_slice(body).map_err(ServerError::RequestParse)
}

/// Handle `POST /api/chat`, dispatching on the body `type`.
pub async fn chat(State(state): State<ServerState>, body: Bytes) -> Result<Response, ServerError> {
    let body = parse_body(&body)?;

    match RequestType::of(&body)? {
        RequestType::CommunityChat => {
            let reply = community_chat(&state, &body)
                .await
                .map_err(ServerError::Chat)?;
            Ok(Json(reply).into_response())
        }
        RequestType::FinancialAdvice => {
            let advice = financial_advice(&state, &body, MissingTotals::Reject)
                .await
                .map_err(ServerError::Advice)?;
            Ok(Json(advice).into_response())
        }
    }
}

/// Handle `POST /api/financial-advisor`.
///
/// Same pipeline as a `financial-advice` chat body, but absent totals are
/// derived from the transactions.
pub async fn financial_advisor(
    State(state): State<ServerState>,
    body: Bytes,
) -> Result<Json<AdviceResponse>, ServerError> {
    let body = parse_body(&body)?;
    let advice = financial_advice(&state, &body, MissingTotals::Derive)
        .await
        .map_err(ServerError::Advice)?;
    Ok(Json(advice))
}

async fn community_chat(state: &ServerState, body: &Value) -> Result<ChatReply, OperationError> {
    let message = validate_message(body)?;

    let reply = state
        .gateway
        .complete(COMMUNITY_SYSTEM_PROMPT, message, SamplingParams::CHAT)
        .await
        .map_err(OperationError::empty_reply_as(NO_CHAT_REPLY))?;

    Ok(ChatReply { reply })
}

async fn financial_advice(
    state: &ServerState,
    body: &Value,
    missing: MissingTotals,
) -> Result<AdviceResponse, OperationError> {
    let request = AdviceRequest::from_json(body, missing)?;
    let metrics = Metrics::compute(&request)?;
    let prompt = render_advice_prompt(&request, &metrics);

    let text = state
        .gateway
        .complete(ADVISOR_SYSTEM_PROMPT, &prompt, SamplingParams::ADVICE)
        .await
        .map_err(OperationError::empty_reply_as(NO_ADVICE))?;
    let advice = advice_or_fallback(&text, &request, &metrics);

    tracing::info!(
        transactions = request.transactions.len(),
        points = advice.len(),
        "financial advice generated"
    );

    Ok(AdviceResponse {
        advice,
        metrics: metrics_view(metrics),
    })
}

fn metrics_view(metrics: Metrics) -> MetricsView {
    MetricsView {
        savings_rate: metrics.savings_rate.to_string(),
        monthly_net: metrics.monthly_net,
        emergency_fund_months: metrics.emergency_fund_months,
        top_categories: CategoryTotals(metrics.top_categories),
        insights: metrics.insights.iter().map(ToString::to_string).collect(),
    }
}
