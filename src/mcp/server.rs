//! MCP Server implementation
//!
//! Implements the Model Context Protocol server for stdio transport.
//!
//! Each `tools/call` runs on its own task so a slow news API call does not
//! hold up `ping` or other invocations. Responses are written in completion
//! order. A `notifications/cancelled` for an in-flight call aborts its task,
//! which drops the pending HTTP request, and no response is written for it.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::task::{AbortHandle, JoinSet};

use crate::error::{McpError, Result};
use crate::mcp::tools::ToolHandler;
use crate::mcp::types::*;
use crate::news::client::NewsClient;

/// MCP Server info
const SERVER_NAME: &str = "free-crypto-news";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

type InFlight = JoinSet<(RequestId, JsonRpcResponse)>;

/// MCP Server for the crypto news API
pub struct McpServer {
    /// Tool handler, shared with in-flight calls
    tool_handler: Arc<ToolHandler>,
}

/// Per-connection bookkeeping owned by the read loop
#[derive(Default)]
struct Session {
    in_flight: InFlight,
    pending: HashMap<RequestId, AbortHandle>,
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(news_client: NewsClient) -> Self {
        Self {
            tool_handler: Arc::new(ToolHandler::new(news_client)),
        }
    }

    /// Run the server on stdio
    pub async fn run_stdio(&self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.serve(stdin, &mut stdout).await
    }

    /// Serve newline-delimited JSON-RPC until `reader` reaches end of input
    pub async fn serve<R, W>(&self, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut session = Session::default();

        loop {
            tokio::select! {
                Some(joined) = session.in_flight.join_next(), if !session.in_flight.is_empty() => {
                    if let Some(response) = session.finish(joined) {
                        write_response(writer, &response).await?;
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    if line.trim().is_empty() {
                        continue;
                    }
                    if let Some(response) = self.handle_message(&line, &mut session) {
                        write_response(writer, &response).await?;
                    }
                }
            }
        }

        // Input closed: let in-flight calls finish so every request gets its answer.
        while let Some(joined) = session.in_flight.join_next().await {
            if let Some(response) = session.finish(joined) {
                write_response(writer, &response).await?;
            }
        }

        tracing::info!("Input closed, server stopping");
        Ok(())
    }

    /// Handle an incoming JSON-RPC message
    ///
    /// Returns the immediate response, if any. Tool calls are spawned onto
    /// the session and answered when they complete.
    fn handle_message(&self, message: &str, session: &mut Session) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable message");
                return Some(JsonRpcResponse::error(None, JsonRpcError::parse_error(e.to_string())));
            }
        };

        tracing::debug!(method = %request.method, "Received message");

        // Notifications never get a response.
        let Some(id) = request.id.clone() else {
            self.handle_notification(&request, session);
            return None;
        };

        match request.method.as_str() {
            methods::INITIALIZE => Some(respond(id, self.handle_initialize(&request))),
            methods::PING => Some(JsonRpcResponse::success(id, serde_json::json!({}))),
            methods::LIST_TOOLS => Some(respond(id, self.handle_list_tools())),
            methods::CALL_TOOL => {
                if !session.initialized {
                    tracing::debug!(request_id = %id, "Tool call before initialized notification");
                }
                self.spawn_call_tool(id, request.params, session);
                None
            }
            _ => Some(JsonRpcResponse::error(
                Some(id),
                JsonRpcError::method_not_found(&request.method),
            )),
        }
    }

    fn handle_notification(&self, request: &JsonRpcRequest, session: &mut Session) {
        match request.method.as_str() {
            methods::INITIALIZED => {
                session.initialized = true;
            }
            methods::CANCELLED => {
                let params = request
                    .params
                    .clone()
                    .and_then(|p| serde_json::from_value::<CancelledParams>(p).ok());
                match params {
                    Some(params) => session.cancel(&params.request_id, params.reason.as_deref()),
                    None => tracing::warn!("Ignoring cancellation without a requestId"),
                }
            }
            other => tracing::debug!(method = other, "Ignoring notification"),
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, request: &JsonRpcRequest) -> Result<Value> {
        let params: InitializeParams = request
            .params
            .clone()
            .and_then(|p| serde_json::from_value(p).ok())
            .unwrap_or_default();

        if let Some(client) = &params.client_info {
            tracing::info!(client = %client.name, "Client connected");
        }

        let result = InitializeResult {
            protocol_version: negotiate_version(params.protocol_version.as_deref()).to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability::default()),
            },
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle list tools request
    fn handle_list_tools(&self) -> Result<Value> {
        let result = ListToolsResult {
            tools: self.tool_handler.list_tools(),
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Start a tool call on its own task
    fn spawn_call_tool(&self, id: RequestId, params: Option<Value>, session: &mut Session) {
        let handler = Arc::clone(&self.tool_handler);
        let task_id = id.clone();

        let abort = session.in_flight.spawn(async move {
            let result = match parse_call_params(params) {
                Ok(params) => handler.call_tool(&params.name, params.arguments).await,
                Err(e) => CallToolResult::error(e.to_string()),
            };

            let response = match serde_json::to_value(result) {
                Ok(value) => JsonRpcResponse::success(task_id.clone(), value),
                Err(e) => JsonRpcResponse::error(
                    Some(task_id.clone()),
                    JsonRpcError::internal_error(e.to_string()),
                ),
            };
            (task_id, response)
        });

        if session.pending.insert(id.clone(), abort).is_some() {
            tracing::warn!(request_id = %id, "Request id reused while still in flight");
        }
    }
}

impl Session {
    /// Record a finished task and return the response to write
    fn finish(
        &mut self,
        joined: std::result::Result<(RequestId, JsonRpcResponse), tokio::task::JoinError>,
    ) -> Option<JsonRpcResponse> {
        match joined {
            Ok((id, response)) => {
                self.pending.remove(&id);
                Some(response)
            }
            Err(e) if e.is_cancelled() => None,
            Err(e) => {
                tracing::error!(error = %e, "Tool call task failed");
                None
            }
        }
    }

    fn cancel(&mut self, id: &RequestId, reason: Option<&str>) {
        match self.pending.remove(id) {
            Some(handle) => {
                handle.abort();
                tracing::info!(request_id = %id, reason = reason.unwrap_or(""), "Tool call cancelled");
            }
            None => tracing::debug!(request_id = %id, "Cancellation for unknown or finished request"),
        }
    }
}

fn parse_call_params(params: Option<Value>) -> std::result::Result<CallToolParams, McpError> {
    let params = params.ok_or_else(|| McpError::InvalidArguments {
        message: "Missing tool parameters".to_string(),
    })?;

    serde_json::from_value(params).map_err(|e| McpError::InvalidArguments {
        message: e.to_string(),
    })
}

fn respond(id: RequestId, result: Result<Value>) -> JsonRpcResponse {
    match result {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(Some(id), JsonRpcError::internal_error(e.to_string())),
    }
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_string(response)?;
    line.push('\n');
    writer.write_all(line.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn server() -> McpServer {
        let config = Config::default().with_base_url("http://127.0.0.1:1").unwrap();
        McpServer::new(NewsClient::new(&config).unwrap())
    }

    #[test]
    fn test_server_info() {
        assert_eq!(SERVER_NAME, "free-crypto-news");
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let server = server();
        let mut session = Session::default();

        let response = server.handle_message(
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            &mut session,
        );
        assert!(response.is_none());
        assert!(session.initialized);
    }

    #[tokio::test]
    async fn test_parse_error() {
        let server = server();
        let mut session = Session::default();

        let response = server.handle_message("{not json", &mut session).unwrap();
        assert!(response.id.is_none());
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let server = server();
        let mut session = Session::default();

        let response = server
            .handle_message(r#"{"jsonrpc":"2.0","id":9,"method":"resources/list"}"#, &mut session)
            .unwrap();
        assert_eq!(response.id, Some(RequestId::Number(9)));
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn test_call_without_params_is_tool_error() {
        let server = server();
        let mut session = Session::default();

        let response =
            server.handle_message(r#"{"jsonrpc":"2.0","id":3,"method":"tools/call"}"#, &mut session);
        assert!(response.is_none());

        let joined = session.in_flight.join_next().await.unwrap();
        let response = session.finish(joined).unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Missing tool parameters"));
        assert!(session.pending.is_empty());
    }
}
