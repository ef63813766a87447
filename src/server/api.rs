use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use log::{error, info};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use crate::llm::{ChatClient, ChatMessage, LlmError};

#[derive(Deserialize)]
pub struct RelayRequest {
    pub messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct RelayResponse {
    content: String,
}

#[derive(Serialize)]
struct RelayError {
    error: String,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Clone)]
struct AppState {
    client: Arc<dyn ChatClient>,
}

pub fn router(client: Arc<dyn ChatClient>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(relay_chat))
        .route("/health", get(health))
        .layer(cors)
        .with_state(AppState { client })
}

pub async fn start_http_server(
    addr: &str,
    client: Arc<dyn ChatClient>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let addr = addr.parse::<SocketAddr>()?;
    info!("Starting HTTP API server on: http://{}", addr);

    let app = router(client);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "healthy" })
}

/// Forwards one conversation to the inference server and normalizes the
/// outcome: upstream rejections surface as "Ollama API error", everything
/// else as "Internal server error". Stateless per invocation.
async fn relay_chat(
    State(state): State<AppState>,
    payload: Result<Json<RelayRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            error!("API error: {}", rejection);
            return internal_error();
        }
    };

    match state.client.chat(&req.messages).await {
        Ok(content) => (StatusCode::OK, Json(RelayResponse { content })).into_response(),
        Err(LlmError::Api { status, body }) => {
            error!("Ollama error {}: {}", status, body);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(RelayError {
                    error: "Ollama API error".into(),
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!("API error: {}", err);
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(RelayError {
            error: "Internal server error".into(),
        }),
    )
        .into_response()
}
