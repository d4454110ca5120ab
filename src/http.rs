//! HTTP REST surface.
//!
//! Thin axum handlers over the gateway, probe, and message log. Handlers
//! never leak raw errors to the client: bad input gets a 400 with a short
//! reason, everything else a generic 500. Remote completion failures never
//! reach this layer at all — the gateway absorbs them.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::AppConfig;
use crate::error::LoanlineError;
use crate::gateway::ChatGateway;
use crate::provider::probe::probe_all;
use crate::session::DEFAULT_SESSION_ID;
use crate::store::{MessageStore, DEFAULT_LIST_LIMIT};

/// Shared state for all HTTP handlers.
pub struct HttpState {
    pub gateway: ChatGateway,
    pub store: Option<MessageStore>,
    pub config: AppConfig,
}

/// Build the axum router with all endpoints.
pub fn build_router(state: Arc<HttpState>) -> Router {
    Router::new()
        .route("/api/chat", get(list_handler).post(chat_handler))
        .route("/api/probe", get(probe_handler))
        .with_state(state)
}

/// Start the HTTP server on the configured address.
/// Shuts down gracefully on ctrl-c.
pub async fn start_http_server(state: Arc<HttpState>) -> crate::error::Result<()> {
    let addr = state.config.http_addr();
    let app = build_router(state);
    let listener = TcpListener::bind(&addr).await?;
    info!("chat gateway listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await?;

    Ok(())
}

// ============================================================================
// Request / Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub content: Option<String>,
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
    /// Display name for the persisted row (persistence-variant body shape).
    pub username: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub message: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn internal_error() -> Response {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to process your message",
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// `GET /api/chat` — recent persisted messages, newest first; an empty list
/// when no database is configured.
async fn list_handler(State(state): State<Arc<HttpState>>) -> Response {
    let Some(store) = &state.store else {
        return Json(json!({ "messages": [] })).into_response();
    };

    match store.list_recent(DEFAULT_LIST_LIMIT).await {
        Ok(messages) => Json(json!({ "messages": messages })).into_response(),
        Err(err) => {
            error!(error = %err, "failed to list messages");
            internal_error()
        }
    }
}

/// `POST /api/chat` — route one user message through the gateway.
async fn chat_handler(
    State(state): State<Arc<HttpState>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let content = match request.content.as_deref().map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid input: content is required",
            )
        }
    };

    let session_id = request
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION_ID.to_string());

    let reply = match state.gateway.respond(&session_id, &content).await {
        Ok(reply) => reply,
        Err(LoanlineError::InvalidInput(reason)) => {
            return error_response(StatusCode::BAD_REQUEST, &format!("Invalid input: {reason}"))
        }
        Err(err) => {
            error!(error = %err, "chat handling failed");
            return internal_error();
        }
    };

    if let Some(store) = &state.store {
        let username = request.username.as_deref().unwrap_or("user");
        // Two independent inserts; an orphaned user row is tolerated.
        if let Err(err) = store.append(username, &content).await {
            error!(error = %err, "failed to persist user message");
            return internal_error();
        }
        if let Err(err) = store.append("bot", &reply).await {
            error!(error = %err, "failed to persist bot reply");
            return internal_error();
        }
    }

    Json(ChatResponse {
        message: reply,
        session_id,
    })
    .into_response()
}

/// `GET /api/probe` — one status entry per known provider.
async fn probe_handler(State(state): State<Arc<HttpState>>) -> Response {
    let results = probe_all(&state.config).await;
    Json(json!({ "ok": true, "results": results })).into_response()
}
