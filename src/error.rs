//! Error types for the MCP typed tool adapter.
//!
//! `McpError` is the library's single error type. It carries enough
//! information to map directly onto a JSON-RPC 2.0 error object via
//! [`McpError::error_code`] and [`McpError::to_json_rpc_error`].

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    /// Carries the requested tool's name for logging; the wire message is
    /// always the fixed text ("Tool not
    /// found"), independent of which name was looked up.
    #[error("Tool not found")]
    UnknownTool(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Server not initialized")]
    NotInitialized,

    #[error("Duplicate tool name: {0}")]
    DuplicateTool(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl McpError {
    /// JSON-RPC 2.0 error code.
    pub fn error_code(&self) -> i64 {
        match self {
            Self::ParseError(_) => -32700,
            Self::InvalidRequest(_) => -32600,
            Self::MethodNotFound(_) | Self::UnknownTool(_) => -32601,
            Self::InvalidParams(_) => -32602,
            Self::NotInitialized => -32002,
            Self::Io(_) | Self::Internal(_) | Self::DuplicateTool(_) | Self::Json(_) => -32603,
        }
    }

    /// Build a JSON-RPC error response object. `id` is `Null` when the
    /// request couldn't be parsed far enough to recover one.
    pub fn to_json_rpc_error(&self, id: Value) -> Value {
        serde_json::json!({
            "jsonrpc": "2.0",
            "id": id,
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        })
    }
}

pub type McpResult<T> = Result<T, McpError>;
