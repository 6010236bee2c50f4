use axum::{
    Router,
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::post,
};
use gateway::CompletionGateway;
use tracing::Instrument;
use uuid::Uuid;

use std::sync::Arc;

use crate::chat;

#[derive(Clone)]
pub struct ServerState {
    pub gateway: Arc<dyn CompletionGateway>,
}

/// Runs every request inside a span tagged with a fresh request id.
async fn request_span(request: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "request",
        id = %Uuid::new_v4(),
        method = %request.method(),
        path = %request.uri().path(),
    );
    next.run(request).instrument(span).await
}

/// Build the application router around an already constructed gateway.
pub fn app(gateway: Arc<dyn CompletionGateway>) -> Router {
    let state = ServerState { gateway };

    Router::new()
        .route("/api/chat", post(chat::chat))
        .route("/api/financial-advisor", post(chat::financial_advisor))
        .layer(middleware::from_fn(request_span))
        .with_state(state)
}

pub async fn run_with_listener(
    gateway: Arc<dyn CompletionGateway>,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app(gateway)).await
}
