//! MCP server implementation.
//!
//! Handles JSON-RPC 2.0 over stdio according to the MCP protocol specification.
//! One request per input line, one response per accepted line, in input order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{McpError, Result};
use crate::lookup::GeneLookup;
use crate::tools::ToolRegistry;

/// MCP protocol version we support.
const PROTOCOL_VERSION: &str = "2024-11-05";

/// Server information.
const SERVER_NAME: &str = "uniproscope-mcp";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// JSON-RPC 2.0 request.
///
/// Only the fields dispatch reads. `jsonrpc` is ignored, so hosts that omit
/// it are served; `id` is taken from the raw message by correlation.
#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
    /// Method name.
    #[serde(default)]
    pub method: Option<String>,
    /// Method parameters.
    #[serde(default)]
    pub params: Option<JsonValue>,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// Echo of the request's correlation id.
    pub id: JsonValue,
    /// Result on success.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    /// Error on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error object.
#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    /// Error code.
    pub code: i32,
    /// Human-readable message.
    pub message: String,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: JsonValue, result: JsonValue) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: JsonValue, code: i32, message: String) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError { code, message }),
        }
    }

    /// Create an error response from an McpError.
    pub fn from_error(id: JsonValue, err: McpError) -> Self {
        Self::error(id, err.rpc_code(), err.to_string())
    }
}

/// Per-request state threaded through dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// The id the response must echo.
    pub id: JsonValue,
}

/// MCP server.
pub struct McpServer {
    lookup: GeneLookup,
    registry: ToolRegistry,
    /// Id of the most recent request that carried one. Used for requests
    /// that arrive without an id.
    last_id: JsonValue,
}

impl McpServer {
    /// Create a new MCP server over the given lookup facade.
    pub fn new(lookup: GeneLookup) -> Self {
        Self {
            lookup,
            registry: ToolRegistry::new(),
            last_id: JsonValue::from(0),
        }
    }

    /// Run the server, reading from stdin and writing to stdout.
    pub async fn run(&mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Serve requests from `reader` until end of input, writing responses to
    /// `writer`. Only I/O failures end the loop early.
    pub async fn serve<R, W>(&mut self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let bytes_read = reader.read_until(b'\n', &mut buf).await?;

            if bytes_read == 0 {
                // EOF - client disconnected
                break;
            }

            let line = match std::str::from_utf8(&buf) {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("Bad input from host: {}", e);
                    continue;
                }
            };

            let Some(response) = self.handle_line(line).await else {
                continue;
            };

            // Send response
            let response_json = serde_json::to_string(&response)?;
            writer.write_all(response_json.as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        tracing::info!("input closed, shutting down");
        Ok(())
    }

    /// Handle one input line. Returns `None` for blank lines and for lines
    /// that are not JSON; every other line gets exactly one response.
    pub async fn handle_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let message: JsonValue = match serde_json::from_str(line) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Bad JSON from host: {}", e);
                return None;
            }
        };

        let ctx = self.correlate(&message);
        let response = match self.handle_request(&ctx, message).await {
            Ok(result) => JsonRpcResponse::success(ctx.id, result),
            Err(err) => {
                tracing::debug!(error = %err, "request failed");
                JsonRpcResponse::from_error(ctx.id, err)
            }
        };
        Some(response)
    }

    /// Build the request context, remembering the id for later id-less requests.
    fn correlate(&mut self, message: &JsonValue) -> RequestContext {
        if let Some(id) = message.as_object().and_then(|obj| obj.get("id")) {
            self.last_id = id.clone();
        }
        RequestContext {
            id: self.last_id.clone(),
        }
    }

    /// Handle a single JSON-RPC request.
    async fn handle_request(&self, ctx: &RequestContext, message: JsonValue) -> Result<JsonValue> {
        if !message.is_object() {
            return Err(McpError::Protocol("expected a JSON object".to_string()));
        }
        let request: JsonRpcRequest = serde_json::from_value(message)?;
        let method = request
            .method
            .ok_or_else(|| McpError::Protocol("missing 'method'".to_string()))?;
        tracing::debug!(%method, id = %ctx.id, "dispatching");

        // Route to appropriate handler
        match method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tools_call(request.params).await,
            _ => Err(McpError::UnknownMethod(method)),
        }
    }

    /// Handle the initialize request.
    fn handle_initialize(&self) -> JsonValue {
        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": SERVER_VERSION
            }
        })
    }

    /// Handle the tools/list request.
    fn handle_tools_list(&self) -> JsonValue {
        serde_json::json!({ "tools": self.registry.tools() })
    }

    /// Handle the tools/call request.
    async fn handle_tools_call(&self, params: Option<JsonValue>) -> Result<JsonValue> {
        let params = match params {
            Some(JsonValue::Object(obj)) => obj,
            Some(JsonValue::Null) | None => Map::new(),
            _ => {
                return Err(McpError::InvalidArg {
                    name: "params".to_string(),
                    reason: "must be an object".to_string(),
                })
            }
        };

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::MissingArg("name".to_string()))?;

        let arguments = match params.get("arguments") {
            Some(JsonValue::Object(obj)) => obj.clone(),
            Some(JsonValue::Null) | None => Map::new(),
            _ => {
                return Err(McpError::InvalidArg {
                    name: "arguments".to_string(),
                    reason: "must be an object".to_string(),
                })
            }
        };

        let text = self.registry.dispatch(&self.lookup, name, arguments).await?;

        // MCP tool responses are wrapped in content array
        Ok(serde_json::json!({
            "content": [{
                "type": "text",
                "text": text
            }]
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{GeneSource, UpstreamError};
    use async_trait::async_trait;

    struct NoResults;

    #[async_trait]
    impl GeneSource for NoResults {
        async fn search(&self, _gene_symbol: &str) -> std::result::Result<JsonValue, UpstreamError> {
            Ok(serde_json::json!({ "results": [] }))
        }
    }

    fn server() -> McpServer {
        McpServer::new(GeneLookup::new(NoResults))
    }

    #[test]
    fn test_json_rpc_response_success() {
        let response = JsonRpcResponse::success(JsonValue::from(1), serde_json::json!({"ok": true}));
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"result\""));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_json_rpc_response_error() {
        let response = JsonRpcResponse::error(JsonValue::from(1), -1, "Invalid".to_string());
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"error\""));
        assert!(!json.contains("\"result\""));
    }

    #[tokio::test]
    async fn test_blank_and_malformed_lines_yield_nothing() {
        let mut server = server();
        assert!(server.handle_line("   \n").await.is_none());
        assert!(server.handle_line("{not json").await.is_none());
    }

    #[tokio::test]
    async fn test_id_falls_back_to_last_seen() {
        let mut server = server();

        let first = server.handle_line(r#"{"method":"tools/list"}"#).await.unwrap();
        assert_eq!(first.id, JsonValue::from(0));

        let second = server
            .handle_line(r#"{"id":"abc","method":"initialize"}"#)
            .await
            .unwrap();
        assert_eq!(second.id, JsonValue::from("abc"));

        let third = server.handle_line(r#"{"method":"nope"}"#).await.unwrap();
        assert_eq!(third.id, JsonValue::from("abc"));
    }

    #[tokio::test]
    async fn test_jsonrpc_tag_is_not_checked() {
        let mut server = server();
        for line in [
            r#"{"id":1,"method":"tools/list"}"#,
            r#"{"jsonrpc":"1.0","id":2,"method":"tools/list"}"#,
        ] {
            let response = server.handle_line(line).await.unwrap();
            assert!(response.result.is_some());
            assert!(response.error.is_none());
        }
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_is_skipped() {
        let mut input: Vec<u8> = Vec::new();
        input.extend_from_slice(b"{\"id\":1,\"method\":\"tools/list\"}\n");
        input.extend_from_slice(b"\xff\xfe garbage\n");
        input.extend_from_slice(b"{\"id\":2,\"method\":\"initialize\"}\n");
        let mut output: Vec<u8> = Vec::new();

        server().serve(input.as_slice(), &mut output).await.unwrap();

        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[tokio::test]
    async fn test_non_object_request_is_an_error() {
        let mut server = server();
        let response = server.handle_line("[1, 2, 3]").await.unwrap();
        let error = response.error.unwrap();
        assert_eq!(error.code, -1);
        assert!(error.message.starts_with("Invalid request"));
    }

    #[tokio::test]
    async fn test_missing_name_is_an_error() {
        let mut server = server();
        let response = server
            .handle_line(r#"{"id":1,"method":"tools/call","params":{"arguments":{"gene_symbol":"TP53"}}}"#)
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().message, "name is required");
    }

    #[test]
    fn test_initialize_announces_tools_capability() {
        let result = server().handle_initialize();
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(result["capabilities"], serde_json::json!({ "tools": {} }));
        assert_eq!(result["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(result["serverInfo"]["version"], SERVER_VERSION);
    }
}
