//! JSON-RPC handling for the HTTP and SSE transports.
//!
//! The network transports speak plain JSON-RPC 2.0 over `POST /mcp`
//! rather than going through an rmcp peer session. This module owns the
//! envelope types and the method dispatch; the results it produces are
//! the same rmcp model types the stdio transport serializes.

use beatsmith_common::Config;
use beatsmith_common::error::Error;
use rmcp::model::{
    CallToolResult, Content, Implementation, InitializeResult, ProtocolVersion,
    ServerCapabilities,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, warn};

use crate::server::SERVER_INSTRUCTIONS;
use crate::tools;

/// JSON-RPC error codes.
pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// An incoming JSON-RPC request envelope.
#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// Parameters of a `tools/call` request.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Build a JSON-RPC success envelope.
pub fn response(id: Option<Value>, result: Value) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id.unwrap_or(Value::Null),
        "result": result,
    })
}

/// Build a JSON-RPC error envelope.
pub fn error_response(id: Option<Value>, code: i32, message: impl Into<String>) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id.unwrap_or(Value::Null),
        "error": {
            "code": code,
            "message": message.into(),
        },
    })
}

/// The `initialize` result, as a JSON value.
pub fn initialize_result(config: &Config) -> Value {
    let result = InitializeResult {
        protocol_version: ProtocolVersion::LATEST,
        capabilities: ServerCapabilities::builder().enable_tools().build(),
        server_info: Implementation {
            name: config.server_name.clone(),
            title: Some("Beatsmith MCP Server".to_string()),
            version: config.server_version.clone(),
            icons: None,
            website_url: None,
        },
        instructions: Some(SERVER_INSTRUCTIONS.to_string()),
    };
    serde_json::to_value(result).unwrap_or_else(|_| json!({}))
}

/// The `tools/list` result, as a JSON value.
pub fn tools_list_result() -> Value {
    json!({ "tools": tools::catalog() })
}

/// A ping notification carrying the current timestamp.
pub fn ping_notification() -> Value {
    json!({
        "jsonrpc": "2.0",
        "method": "notifications/ping",
        "params": { "timestamp": chrono::Utc::now().to_rfc3339() },
    })
}

/// Handle one JSON-RPC request. Returns `None` for notifications, which
/// get no response by protocol.
pub async fn handle_request(
    config: &Config,
    http: reqwest::Client,
    request: RpcRequest,
) -> Option<Value> {
    debug!(method = %request.method, "Handling JSON-RPC request");

    if request.id.is_none() && request.method.starts_with("notifications/") {
        return None;
    }

    let id = request.id;
    let reply = match request.method.as_str() {
        "initialize" => response(id, initialize_result(config)),
        "tools/list" => response(id, tools_list_result()),
        "tools/call" => {
            let params: ToolCallParams =
                match serde_json::from_value(request.params.unwrap_or(Value::Null)) {
                    Ok(params) => params,
                    Err(e) => {
                        return Some(error_response(
                            id,
                            INVALID_PARAMS,
                            format!("Invalid tools/call parameters: {e}"),
                        ));
                    }
                };
            let arguments = params.arguments.unwrap_or_else(|| json!({}));
            match tools::dispatch(config, http, &params.name, arguments).await {
                Ok(text) => {
                    let result = CallToolResult::success(vec![Content::text(text)]);
                    match serde_json::to_value(result) {
                        Ok(value) => response(id, value),
                        Err(e) => {
                            let (code, message) =
                                rpc_error_parts(Error::internal(e.to_string()));
                            error_response(id, code, message)
                        }
                    }
                }
                Err(error) => {
                    warn!(tool = %params.name, %error, "Tool call failed");
                    let (code, message) = rpc_error_parts(error);
                    error_response(id, code, message)
                }
            }
        }
        other => error_response(id, METHOD_NOT_FOUND, format!("Method not found: {other}")),
    };

    Some(reply)
}

/// Map dispatch errors onto JSON-RPC codes, mirroring the stdio handler.
fn rpc_error_parts(error: Error) -> (i32, String) {
    match error {
        Error::UnknownTool(_) | Error::Credential(_) | Error::Validation(_) => {
            (INVALID_PARAMS, error.to_string())
        }
        other => (INTERNAL_ERROR, other.to_string()),
    }
}
