//! MCP method surface over the dispatcher.

use std::sync::atomic::{AtomicBool, Ordering};

use protocol::{
    CallToolParams, CallToolResult, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, RequestId, ServerCapabilities, ServerInfo,
    negotiate_version,
};
use serde_json::{Value, json};
use tracing::debug;

use crate::dispatch::Dispatcher;
use crate::error::Result;
use crate::invocation::{InvocationRequest, InvocationResult};

/// Identity the server advertises during the initialize handshake.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub name: String,
    pub version: String,
    pub instructions: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "dockhand".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            instructions: None,
        }
    }
}

/// An MCP server: routes `initialize`, `ping`, `tools/list`, and
/// `tools/call` onto a [`Dispatcher`].
///
/// Tool-level failures are answered as `CallToolResult { isError: true }`;
/// JSON-RPC errors are reserved for envelope-level faults (unknown
/// method, bad params, requests before the handshake finished).
pub struct Server {
    config: ServerConfig,
    dispatcher: Dispatcher,
    initialized: AtomicBool,
}

impl Server {
    pub fn new(config: ServerConfig, dispatcher: Dispatcher) -> Self {
        Self {
            config,
            dispatcher,
            initialized: AtomicBool::new(false),
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Whether the client has completed the initialize handshake.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    /// Handle one raw request line; returns the response line, if any.
    ///
    /// Unparseable input is answered with a JSON-RPC error at id `null`;
    /// notifications produce no response.
    pub async fn handle_line(&self, line: &str) -> Result<Option<String>> {
        let request = match protocol::parse_request(line) {
            Ok(request) => request,
            Err(error) => {
                let rpc_error = match &error {
                    protocol::Error::Json(_) => JsonRpcError::parse_error(&error),
                    protocol::Error::Envelope(_) => JsonRpcError::invalid_request(&error),
                };
                let response = JsonRpcResponse::error(RequestId::Null, rpc_error);
                return Ok(Some(serde_json::to_string(&response)?));
            }
        };

        match self.handle_request(request).await {
            Some(response) => Ok(Some(serde_json::to_string(&response)?)),
            None => Ok(None),
        }
    }

    /// Route a parsed request. Notifications return `None`.
    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        let Some(id) = request.id.clone() else {
            self.handle_notification(&request);
            return None;
        };

        let result = match request.method.as_str() {
            "initialize" => self.initialize(request.params_or_default()),
            "ping" => Ok(json!({})),
            "tools/list" => self.list_tools(),
            "tools/call" => self.call_tool(request.params_or_default()).await,
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => {
                self.initialized.store(true, Ordering::SeqCst);
                debug!("client completed initialization");
            }
            other => debug!(method = %other, "ignoring notification"),
        }
    }

    fn initialize(&self, params: Value) -> std::result::Result<Value, JsonRpcError> {
        let params: InitializeParams =
            serde_json::from_value(params).map_err(JsonRpcError::invalid_params)?;
        if let Some(client) = &params.client_info {
            debug!(client = %client.name, requested = %params.protocol_version, "initialize");
        }

        let result = InitializeResult {
            protocol_version: negotiate_version(&params.protocol_version).to_string(),
            capabilities: ServerCapabilities::tools_only(),
            server_info: ServerInfo {
                name: self.config.name.clone(),
                version: self.config.version.clone(),
            },
            instructions: self.config.instructions.clone(),
        };
        serde_json::to_value(result).map_err(JsonRpcError::internal_error)
    }

    fn list_tools(&self) -> std::result::Result<Value, JsonRpcError> {
        self.ensure_initialized()?;
        let result = ListToolsResult {
            tools: self.dispatcher.registry().listing(),
        };
        serde_json::to_value(result).map_err(JsonRpcError::internal_error)
    }

    async fn call_tool(&self, params: Value) -> std::result::Result<Value, JsonRpcError> {
        self.ensure_initialized()?;
        let params: CallToolParams =
            serde_json::from_value(params).map_err(JsonRpcError::invalid_params)?;

        let request = InvocationRequest::new(params.name, params.arguments.unwrap_or(Value::Null));
        let result = match self.dispatcher.invoke(request).await {
            InvocationResult::Success { output } => CallToolResult::success(render_output(&output)),
            InvocationResult::Failure { error } => CallToolResult::error(error.to_string()),
        };
        serde_json::to_value(result).map_err(JsonRpcError::internal_error)
    }

    fn ensure_initialized(&self) -> std::result::Result<(), JsonRpcError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(JsonRpcError::not_initialized())
        }
    }
}

/// String outputs go through verbatim; everything else as compact JSON.
fn render_output(output: &Value) -> String {
    match output {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use registry::{Arguments, ParamSpec, ParamType, Registry, Tool, ToolError, ToolSpec};
    use serde::Deserialize;
    use std::sync::Arc;

    struct AdderTool {
        spec: ToolSpec,
    }

    impl AdderTool {
        fn new() -> Self {
            Self {
                spec: ToolSpec::new("add", "Add two numbers", ParamType::Integer)
                    .param(ParamSpec::required("a", ParamType::Integer, "First addend"))
                    .param(ParamSpec::required("b", ParamType::Integer, "Second addend")),
            }
        }
    }

    #[derive(Deserialize)]
    struct AdderArgs {
        a: i64,
        b: i64,
    }

    #[async_trait]
    impl Tool for AdderTool {
        fn spec(&self) -> &ToolSpec {
            &self.spec
        }

        async fn call(&self, args: Arguments) -> std::result::Result<Value, ToolError> {
            let AdderArgs { a, b } = args.parse()?;
            Ok(json!(a + b))
        }
    }

    fn server() -> Server {
        let registry = Registry::builder().register(AdderTool::new()).unwrap().build();
        Server::new(ServerConfig::default(), Dispatcher::new(Arc::new(registry)))
    }

    async fn respond(server: &Server, line: &str) -> Value {
        let response = server.handle_line(line).await.unwrap().unwrap();
        serde_json::from_str(&response).unwrap()
    }

    async fn initialize(server: &Server) {
        respond(
            server,
            r#"{"jsonrpc":"2.0","id":0,"method":"initialize","params":{"protocolVersion":"2024-11-05"}}"#,
        )
        .await;
        let none = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#)
            .await
            .unwrap();
        assert!(none.is_none());
    }

    #[tokio::test]
    async fn initialize_echoes_known_protocol_version() {
        let server = server();
        let response = respond(
            &server,
            r#"{"jsonrpc":"2.0","id":0,"method":"initialize","params":{"protocolVersion":"2024-11-05","clientInfo":{"name":"test"}}}"#,
        )
        .await;
        assert_eq!(response["result"]["protocolVersion"], "2024-11-05");
        assert_eq!(response["result"]["serverInfo"]["name"], "dockhand");
        assert_eq!(
            response["result"]["capabilities"]["tools"]["listChanged"],
            json!(false)
        );
    }

    #[tokio::test]
    async fn ping_answers_empty_object_before_handshake() {
        let server = server();
        let response = respond(&server, r#"{"jsonrpc":"2.0","id":7,"method":"ping"}"#).await;
        assert_eq!(response["result"], json!({}));
        assert_eq!(response["id"], json!(7));
    }

    #[tokio::test]
    async fn tools_list_requires_handshake() {
        let server = server();
        let response = respond(&server, r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).await;
        assert_eq!(response["error"]["code"], json!(-32002));
    }

    #[tokio::test]
    async fn tools_list_returns_registered_tools() {
        let server = server();
        initialize(&server).await;
        let response = respond(&server, r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#).await;
        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["name"], "add");
        assert_eq!(tools[0]["inputSchema"]["required"], json!(["a", "b"]));
    }

    #[tokio::test]
    async fn tools_call_returns_text_result() {
        let server = server();
        initialize(&server).await;
        let response = respond(
            &server,
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"add","arguments":{"a":2,"b":3}}}"#,
        )
        .await;
        assert_eq!(response["result"]["isError"], json!(false));
        assert_eq!(response["result"]["content"][0]["text"], "5");
    }

    #[tokio::test]
    async fn tools_call_failure_is_a_result_not_an_rpc_error() {
        let server = server();
        initialize(&server).await;
        let response = respond(
            &server,
            r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"subtract","arguments":{}}}"#,
        )
        .await;
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], json!(true));
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("tool not found: subtract"));
    }

    #[tokio::test]
    async fn tools_call_without_name_is_invalid_params() {
        let server = server();
        initialize(&server).await;
        let response = respond(
            &server,
            r#"{"jsonrpc":"2.0","id":4,"method":"tools/call","params":{"arguments":{}}}"#,
        )
        .await;
        assert_eq!(response["error"]["code"], json!(-32602));
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let server = server();
        let response =
            respond(&server, r#"{"jsonrpc":"2.0","id":5,"method":"resources/list"}"#).await;
        assert_eq!(response["error"]["code"], json!(-32601));
    }

    #[tokio::test]
    async fn garbage_line_gets_parse_error_at_null_id() {
        let server = server();
        let response = respond(&server, "{not json").await;
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["error"]["code"], json!(-32700));
    }

    #[tokio::test]
    async fn wrong_envelope_version_is_invalid_request() {
        let server = server();
        let response =
            respond(&server, r#"{"jsonrpc":"1.0","id":6,"method":"ping"}"#).await;
        assert_eq!(response["error"]["code"], json!(-32600));
    }

    #[tokio::test]
    async fn unknown_notification_is_ignored() {
        let server = server();
        let none = server
            .handle_line(r#"{"jsonrpc":"2.0","method":"notifications/cancelled"}"#)
            .await
            .unwrap();
        assert!(none.is_none());
        assert!(!server.is_initialized());
    }

    #[test]
    fn render_string_output_verbatim() {
        assert_eq!(render_output(&json!("hello")), "hello");
        assert_eq!(render_output(&json!([1, 2])), "[1,2]");
        assert_eq!(render_output(&json!(5)), "5");
    }
}
