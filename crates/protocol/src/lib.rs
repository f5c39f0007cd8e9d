//! MCP (Model Context Protocol) wire types, serving side.
//!
//! This crate provides the JSON-RPC 2.0 envelopes and the MCP method
//! payloads a server needs: requests are deserialized from incoming
//! lines, responses are serialized back out.
//!
//! # Example
//!
//! ```
//! use protocol::{parse_request, JsonRpcResponse};
//!
//! # fn example() -> protocol::Result<()> {
//! let request = parse_request(r#"{"jsonrpc":"2.0","id":1,"method":"ping"}"#)?;
//! assert_eq!(request.method, "ping");
//!
//! let id = request.id.clone().unwrap();
//! let response = JsonRpcResponse::success(id, serde_json::json!({}));
//! println!("{}", serde_json::to_string(&response)?);
//! # Ok(())
//! # }
//! ```

mod error;
mod jsonrpc;
mod mcp;

pub use error::{Error, Result};
pub use jsonrpc::{
    ErrorCode, JsonRpcError, JsonRpcRequest, JsonRpcResponse, RequestId, parse_request,
};
pub use mcp::{
    CallToolParams, CallToolResult, ClientInfo, InitializeParams, InitializeResult,
    LATEST_PROTOCOL_VERSION, ListToolsResult, SUPPORTED_PROTOCOL_VERSIONS, ServerCapabilities,
    ServerInfo, Tool, ToolContent, ToolsCapability, negotiate_version,
};
