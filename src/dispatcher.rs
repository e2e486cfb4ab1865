//! The MCP dispatcher: a single-threaded JSON-RPC 2.0 loop over a
//! line-framed byte stream, implementing the MCP lifecycle
//! (`initialize`, `initialized`, `tools/list`, `tools/call`,
//! `logging/setLevel`) and the `$/progress` notification sandwich.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{McpError, McpResult};
use crate::logging::LogLevel;
use crate::notification::{Notification, NotificationCtx};
use crate::tool::{ToolOutcome, ToolRegistry};
use crate::value::parse_line;

const PROTOCOL_VERSION: &str = "2024-11-05";

/// Everything the dispatcher needs between requests: the tool registry, the
/// shared application context, and the two pieces of mutable lifecycle
/// state (`initialized`, `min_log_level`).
pub struct ServerState<C> {
    context: Arc<C>,
    name: String,
    version: String,
    registry: ToolRegistry<C>,
    initialized: bool,
    min_log_level: LogLevel,
}

impl<C> ServerState<C> {
    pub fn new(
        context: Arc<C>,
        name: impl Into<String>,
        version: impl Into<String>,
        registry: ToolRegistry<C>,
    ) -> Self {
        Self {
            context,
            name: name.into(),
            version: version.into(),
            registry,
            initialized: false,
            min_log_level: LogLevel::default(),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn min_log_level(&self) -> LogLevel {
        self.min_log_level
    }
}

impl<C: Send + Sync + 'static> ServerState<C> {
    /// Drive the dispatch loop over an already-split reader/writer pair,
    /// until EOF (one JSON frame per line).
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> McpResult<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut reader = reader;
        let mut line = String::new();
        loop {
            line.clear();
            let read = reader.read_line(&mut line).await.map_err(McpError::Io)?;
            if read == 0 {
                break;
            }
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.is_empty() {
                continue;
            }
            self.dispatch_line(trimmed, &mut writer).await?;
        }
        Ok(())
    }

    /// Drive the dispatch loop over real stdio.
    pub async fn serve_stdio(&mut self) -> McpResult<()> {
        let reader = BufReader::new(tokio::io::stdin());
        let writer = tokio::io::stdout();
        self.serve(reader, writer).await
    }

    /// Parse and handle a single transport line, writing zero or more
    /// response/notification frames. Never returns an `Err` for a
    /// protocol-level problem; those are written as JSON-RPC error
    /// frames, and this only errors on a transport write/IO failure.
    async fn dispatch_line<W: AsyncWrite + Unpin>(
        &mut self,
        line: &str,
        writer: &mut W,
    ) -> McpResult<()> {
        let value = match parse_line(line.as_bytes()) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "malformed JSON-RPC frame");
                return write_frame(writer, &e.to_json_rpc_error(Value::Null)).await;
            }
        };

        let request = match IncomingRequest::parse(&value) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(error = %e, "malformed JSON-RPC request");
                return write_frame(writer, &e.to_json_rpc_error(Value::Null)).await;
            }
        };

        self.dispatch(request, writer).await
    }

    async fn dispatch<W: AsyncWrite + Unpin>(
        &mut self,
        request: IncomingRequest,
        writer: &mut W,
    ) -> McpResult<()> {
        let is_notification = request.is_notification();
        let id = request.id.clone().unwrap_or(Value::Null);
        tracing::debug!(method = %request.method, notification = is_notification, "dispatching");

        if !self.initialized && request.method != "initialize" {
            if is_notification {
                return Ok(());
            }
            return write_frame(writer, &McpError::NotInitialized.to_json_rpc_error(id)).await;
        }

        match request.method.as_str() {
            "initialize" => self.handle_initialize(id, is_notification, writer).await,
            "notifications/initialized" => Ok(()),
            "tools/list" => self.handle_tools_list(id, is_notification, writer).await,
            "tools/call" => {
                self.handle_tools_call(id, is_notification, request.params, writer).await
            }
            "logging/setLevel" => {
                self.handle_set_level(id, is_notification, request.params, writer).await
            }
            other => {
                if is_notification {
                    return Ok(());
                }
                write_frame(
                    writer,
                    &McpError::MethodNotFound(other.to_string()).to_json_rpc_error(id),
                )
                .await
            }
        }
    }

    async fn handle_initialize<W: AsyncWrite + Unpin>(
        &mut self,
        id: Value,
        is_notification: bool,
        writer: &mut W,
    ) -> McpResult<()> {
        self.initialized = true;
        tracing::info!(server = %self.name, version = %self.version, "server initialized");
        if !is_notification {
            let result = serde_json::json!({
                "protocolVersion": PROTOCOL_VERSION,
                "serverInfo": {"name": self.name, "version": self.version},
                "capabilities": {"tools": {"listChanged": false}, "logging": {}},
            });
            write_frame(writer, &ok_response(id, result)).await?;
        }
        write_frame(writer, &serde_json::json!({"jsonrpc": "2.0", "method": "initialized"})).await
    }

    async fn handle_tools_list<W: AsyncWrite + Unpin>(
        &self,
        id: Value,
        is_notification: bool,
        writer: &mut W,
    ) -> McpResult<()> {
        if is_notification {
            return Ok(());
        }
        let tools: Vec<Value> = self.registry.iter().map(|t| t.to_json()).collect();
        write_frame(writer, &ok_response(id, serde_json::json!({"tools": tools}))).await
    }

    async fn handle_set_level<W: AsyncWrite + Unpin>(
        &mut self,
        id: Value,
        is_notification: bool,
        params: Option<Value>,
        writer: &mut W,
    ) -> McpResult<()> {
        match extract_level(&params) {
            Some(level) => {
                self.min_log_level = level;
                if !is_notification {
                    write_frame(writer, &ok_response(id, Value::Null)).await?;
                }
                Ok(())
            }
            None => {
                if is_notification {
                    return Ok(());
                }
                write_frame(
                    writer,
                    &McpError::InvalidParams("Missing or invalid \"level\"".into())
                        .to_json_rpc_error(id),
                )
                .await
            }
        }
    }

    async fn handle_tools_call<W: AsyncWrite + Unpin>(
        &self,
        id: Value,
        is_notification: bool,
        params: Option<Value>,
        writer: &mut W,
    ) -> McpResult<()> {
        macro_rules! fail {
            ($err:expr) => {{
                if !is_notification {
                    write_frame(writer, &$err.to_json_rpc_error(id)).await?;
                }
                return Ok(());
            }};
        }

        let Some(params) = params else {
            fail!(McpError::InvalidParams("Missing params".into()));
        };
        let obj = params.as_object();
        let Some(name) = obj.and_then(|o| o.get("name")).and_then(Value::as_str) else {
            fail!(McpError::InvalidParams("Missing tool name".into()));
        };
        let Some(tool) = self.registry.get(name) else {
            fail!(McpError::UnknownTool(name.to_string()));
        };
        let Some(arguments) = obj.and_then(|o| o.get("arguments")).cloned() else {
            fail!(McpError::InvalidParams("Missing arguments".into()));
        };
        let progress_token = obj.and_then(|o| o.get("progressToken")).cloned();

        if let Some(token) = &progress_token {
            write_frame(writer, &progress_frame(token, 0.into(), Value::Null)).await?;
        }

        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let notif = NotificationCtx::new(tx, progress_token.clone());
        tracing::debug!(tool = name, "invoking tool");
        let outcome = tool.invoke(Arc::clone(&self.context), notif, arguments).await;

        while let Ok(note) = rx.try_recv() {
            if should_forward(&note, self.min_log_level) {
                write_frame(writer, &notification_frame(&note)).await?;
            }
        }

        if let Some(token) = &progress_token {
            write_frame(writer, &progress_frame(token, 100.into(), 100.into())).await?;
        }

        if is_notification {
            return Ok(());
        }
        let content = match outcome {
            ToolOutcome::Success(v) => content_envelope(false, v),
            ToolOutcome::Failure(msg) => content_envelope(true, Value::String(msg)),
        };
        write_frame(writer, &ok_response(id, content)).await
    }
}

/// The parts of a decoded JSON-RPC frame the dispatcher cares about.
/// `id: None` means the frame is a notification.
struct IncomingRequest {
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

impl IncomingRequest {
    fn parse(value: &Value) -> McpResult<Self> {
        let obj = value
            .as_object()
            .ok_or_else(|| McpError::InvalidRequest("request must be a JSON object".into()))?;
        let id = obj.get("id").cloned();
        let method = obj
            .get("method")
            .and_then(Value::as_str)
            .ok_or_else(|| McpError::InvalidRequest("missing \"method\"".into()))?
            .to_string();
        let params = obj.get("params").cloned();
        if let Some(p) = &params {
            if !p.is_object() && !p.is_array() {
                return Err(McpError::InvalidRequest(
                    "\"params\" must be an object or array".into(),
                ));
            }
        }
        Ok(Self { id, method, params })
    }

    fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

fn ok_response(id: Value, result: Value) -> Value {
    serde_json::json!({"jsonrpc": "2.0", "id": id, "result": result})
}

fn content_envelope(is_error: bool, text: Value) -> Value {
    serde_json::json!({"isError": is_error, "content": [{"type": "text", "text": text}]})
}

fn progress_frame(token: &Value, progress: Value, total: Value) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "method": "$/progress",
        "params": {"token": token, "progress": progress, "total": total},
    })
}

fn notification_frame(note: &Notification) -> Value {
    serde_json::json!({"jsonrpc": "2.0", "method": note.method, "params": note.params})
}

fn extract_level(params: &Option<Value>) -> Option<LogLevel> {
    params.as_ref()?.as_object()?.get("level")?.as_str().and_then(LogLevel::parse)
}

/// `$/progress` notifications always go out; `notifications/message` ones
/// are gated by `ServerState.min_log_level`.
fn should_forward(note: &Notification, min: LogLevel) -> bool {
    if note.method != "notifications/message" {
        return true;
    }
    match note.params.get("level").and_then(Value::as_str).and_then(LogLevel::parse) {
        Some(level) => level.passes(min),
        None => true,
    }
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, value: &Value) -> McpResult<()> {
    let line = serde_json::to_string(value).map_err(McpError::Json)?;
    writer.write_all(line.as_bytes()).await.map_err(McpError::Io)?;
    writer.write_all(b"\n").await.map_err(McpError::Io)?;
    writer.flush().await.map_err(McpError::Io)
}
