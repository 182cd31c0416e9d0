//! HTTP and SSE transports.
//!
//! One axum server carries both network transports:
//!
//! - `GET /` and `GET /health` for service discovery and probes
//! - `POST /mcp` for one-shot JSON-RPC requests
//! - `GET /sse` for an event stream that opens with the initialize and
//!   tools/list results and then emits a ping every 30 seconds
//!
//! CORS is fully permissive; the server fronts a key-per-request API and
//! holds no ambient credential worth protecting.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use beatsmith_common::{Config, ServerError, wait_for_shutdown_signal};
use futures::stream::Stream;
use serde_json::{Value, json};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::ReceiverStream;
use tower_http::cors::CorsLayer;
use tracing::{debug, info};

use crate::rpc::{self, RpcRequest};

/// Interval between ping notifications on the event stream.
const PING_INTERVAL: Duration = Duration::from_secs(30);

/// Shared state for the HTTP transport.
pub struct McpState {
    config: Config,
    /// Shared connection pool; cloned per request
    http: reqwest::Client,
    /// Transport label reported by the discovery endpoints
    transport: &'static str,
}

impl McpState {
    pub fn new(config: Config, transport: &'static str) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
            transport,
        }
    }
}

/// Build the MCP HTTP router.
pub fn router(state: Arc<McpState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/sse", get(sse_handler))
        .route("/mcp", post(mcp_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run the HTTP transport until a shutdown signal arrives.
pub async fn serve(config: Config, port: u16, transport: &'static str) -> Result<(), ServerError> {
    let state = Arc::new(McpState::new(config, transport));
    let app = router(state);

    let addr = format!("0.0.0.0:{port}");
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| ServerError::BindFailed {
                port,
                message: e.to_string(),
            })?;

    info!(%addr, transport, "MCP HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .map_err(ServerError::Io)
}

async fn root_handler(State(state): State<Arc<McpState>>) -> Json<Value> {
    Json(json!({
        "name": state.config.server_name,
        "version": state.config.server_version,
        "status": "running",
        "protocol": "mcp",
        "transport": state.transport,
        "endpoints": {
            "mcp": "/mcp",
            "sse": "/sse",
            "health": "/health",
        },
    }))
}

async fn health_handler(State(state): State<Arc<McpState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": state.config.server_name,
        "version": state.config.server_version,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// One-shot JSON-RPC endpoint.
///
/// The body is parsed by hand so that malformed JSON yields a JSON-RPC
/// parse error instead of a bare HTTP rejection. Notifications are
/// accepted with no body.
async fn mcp_handler(State(state): State<Arc<McpState>>, body: String) -> Response {
    let request: RpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            return Json(rpc::error_response(
                None,
                rpc::PARSE_ERROR,
                format!("Parse error: {e}"),
            ))
            .into_response();
        }
    };

    match rpc::handle_request(&state.config, state.http.clone(), request).await {
        Some(reply) => Json(reply).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

/// The envelopes sent eagerly when an SSE connection opens: the
/// initialize result (id 0) and the tools/list result (id 1).
pub fn sse_preamble(config: &Config) -> [Value; 2] {
    [
        rpc::response(Some(json!(0)), rpc::initialize_result(config)),
        rpc::response(Some(json!(1)), rpc::tools_list_result()),
    ]
}

/// Feed one client's event payloads: the preamble, then a ping
/// notification once per interval. Runs until the receiver is dropped.
async fn stream_payloads(config: Config, tx: mpsc::Sender<Value>) {
    for envelope in sse_preamble(&config) {
        if tx.send(envelope).await.is_err() {
            return;
        }
    }

    let mut interval = tokio::time::interval(PING_INTERVAL);
    // The first tick fires immediately; skip it so pings start after
    // one full interval.
    interval.tick().await;

    loop {
        interval.tick().await;
        if tx.send(rpc::ping_notification()).await.is_err() {
            debug!("SSE client disconnected, stopping pings");
            return;
        }
    }
}

/// Server-push event stream.
///
/// Sends the preamble, then a ping notification every 30 seconds until
/// the client goes away.
async fn sse_handler(
    State(state): State<Arc<McpState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (tx, rx) = mpsc::channel::<Value>(16);
    tokio::spawn(stream_payloads(state.config.clone(), tx));

    let stream = ReceiverStream::new(rx)
        .map(|payload| Ok(Event::default().event("message").data(payload.to_string())));
    Sse::new(stream)
}
