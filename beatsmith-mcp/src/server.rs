//! MCP server handler.
//!
//! Implements the rmcp `ServerHandler` for the stdio transport. Tool
//! listing and dispatch delegate to [`crate::tools`], shared with the
//! HTTP transport.

use beatsmith_common::Config;
use beatsmith_common::error::Error;
use rmcp::{
    ErrorData as McpError, ServerHandler,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
};
use serde_json::Value;

use crate::tools;

/// Instructions advertised during MCP initialization.
pub const SERVER_INSTRUCTIONS: &str =
    "Music and sound effect generation server backed by the ElevenLabs API. \
     Use generate_music and generate_sound_effect to create audio from text \
     prompts; every generation tool needs your ElevenLabs API key in the \
     elevenlabs_api_key parameter. get_music_examples returns example \
     prompts without a key.";

/// MCP server for ElevenLabs audio generation.
#[derive(Clone)]
pub struct BeatsmithServer {
    config: Config,
    /// Shared connection pool; cloned per call
    http: reqwest::Client,
}

impl BeatsmithServer {
    /// Create a new server with the given configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Run one tool call and wrap the outcome for the MCP peer.
    pub async fn call(&self, name: &str, arguments: Value) -> Result<CallToolResult, McpError> {
        let text = tools::dispatch(&self.config, self.http.clone(), name, arguments)
            .await
            .map_err(tool_error)?;
        Ok(CallToolResult::success(vec![Content::text(text)]))
    }
}

/// Map dispatch errors onto JSON-RPC error codes. Caller mistakes (bad
/// tool name, missing key, malformed parameters) are invalid-params;
/// everything else is an internal error.
fn tool_error(error: Error) -> McpError {
    match error {
        Error::UnknownTool(_) | Error::Credential(_) | Error::Validation(_) => {
            McpError::invalid_params(error.to_string(), None)
        }
        other => McpError::internal_error(other.to_string(), None),
    }
}

impl ServerHandler for BeatsmithServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _params: Option<rmcp::model::PaginatedRequestParam>,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<rmcp::model::ListToolsResult, McpError>> + Send + '_
    {
        async move {
            Ok(rmcp::model::ListToolsResult {
                tools: tools::catalog(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        params: rmcp::model::CallToolRequestParam,
        _context: rmcp::service::RequestContext<rmcp::service::RoleServer>,
    ) -> impl std::future::Future<Output = Result<CallToolResult, McpError>> + Send + '_ {
        async move {
            let arguments = params
                .arguments
                .map(Value::Object)
                .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
            self.call(params.name.as_ref(), arguments).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn server() -> BeatsmithServer {
        BeatsmithServer::new(Config::default())
    }

    #[test]
    fn test_server_info_advertises_tools() {
        let info = server().get_info();
        assert!(info.instructions.is_some());
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_call_unknown_tool_is_invalid_params() {
        let err = server().call("no_such_tool", json!({})).await.unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
    }

    #[tokio::test]
    async fn test_call_without_key_is_invalid_params() {
        let err = server()
            .call("generate_music", json!({"prompt": "jazz"}))
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert!(err.message.contains("API key"));
    }

    #[tokio::test]
    async fn test_call_examples_succeeds() {
        let result = server().call("get_music_examples", json!({})).await.unwrap();
        assert_eq!(result.is_error, Some(false));
    }
}
