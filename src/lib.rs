//! # toolmcp - Typed Tool Adapters for MCP Servers
//!
//! `toolmcp` turns a plain async function into a [Model Context Protocol
//! (MCP)](https://modelcontextprotocol.io) tool: it derives the tool's JSON
//! Schema from your parameter type, decodes incoming arguments into it,
//! encodes your typed result back to JSON, and speaks the line-framed
//! JSON-RPC 2.0 dialect MCP clients expect over stdio.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use toolmcp::{McpServerBuilder, McpResult};
//! use serde::{Deserialize, Serialize};
//! use schemars::JsonSchema;
//! use std::sync::Arc;
//!
//! #[derive(Clone)]
//! struct AppContext;
//!
//! #[derive(JsonSchema, Deserialize)]
//! struct AddInput {
//!     a: i64,
//!     b: i64,
//! }
//!
//! #[derive(JsonSchema, Serialize)]
//! struct AddOutput {
//!     sum: i64,
//! }
//!
//! #[tokio::main]
//! async fn main() -> McpResult<()> {
//!     let mut server = McpServerBuilder::new(AppContext, "add-server", "1.0.0")
//!         .with_tool("add", "Add two integers", |input: AddInput, _ctx: Arc<AppContext>, _notif| async move {
//!             Ok(AddOutput { sum: input.a + input.b })
//!         })
//!         .build();
//!
//!     server.serve_stdio().await
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │              builder                    │  ← McpServerBuilder<C> fluent API
//! ├─────────────────────────────────────────┤
//! │           tool / bridge / schema        │  ← typed adapter: decode, invoke, encode
//! ├─────────────────────────────────────────┤
//! │              dispatcher                 │  ← JSON-RPC loop over stdio, lifecycle
//! ├─────────────────────────────────────────┤
//! │          notification / value           │  ← progress/log frames, line framing
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Core Concepts
//!
//! ### Tools
//! A tool is any async function shaped `Fn(P, Arc<C>, NotificationCtx) ->
//! impl Future<Output = McpResult<O>>`, where `P` and `O` derive
//! [`schemars::JsonSchema`] and `serde`'s `Deserialize`/`Serialize`:
//!
//! ```rust,no_run
//! # use toolmcp::*; use schemars::JsonSchema; use serde::{Serialize, Deserialize}; use std::sync::Arc;
//! # #[derive(Clone)] struct Context;
//! #[derive(JsonSchema, Deserialize)]
//! struct CalculateInput { a: f64, b: f64 }
//!
//! #[derive(JsonSchema, Serialize)]
//! struct CalculateOutput { result: f64 }
//!
//! async fn calculate(input: CalculateInput, _ctx: Arc<Context>, _notif: NotificationCtx) -> McpResult<CalculateOutput> {
//!     Ok(CalculateOutput { result: input.a + input.b })
//! }
//! ```
//!
//! ### Notifications
//! A handler can report progress or emit log messages mid-call through the
//! [`NotificationCtx`] it's handed; the dispatcher wraps every `tools/call`
//! in its own `$/progress` start/end frames regardless.
//!
//! ### Error Handling
//! [`McpError`] is the library's single error type and maps directly onto
//! JSON-RPC 2.0 error codes. A handler's own `Err(McpError)` return is
//! distinct from a JSON-RPC protocol error: it surfaces as an ordinary
//! `tools/call` *result* with `isError: true`, never as a JSON-RPC `error`
//! object; only malformed requests, unknown methods, and an
//! uninitialized session produce those.
//!
//! ```rust,no_run
//! # use toolmcp::*;
//! fn my_tool() -> McpResult<String> {
//!     if some_condition() {
//!         return Err(McpError::InvalidParams("Bad input".to_string()));
//!     }
//!     Ok("Success".to_string())
//! }
//! # fn some_condition() -> bool { false }
//! ```
//!
//! ### Logging
//! Uses [`tracing`](https://docs.rs/tracing) for structured, contextual
//! logging; [`init_tracing`] wires up an `EnvFilter` from `RUST_LOG`
//! (defaulting to `info`) the way a small binary typically wants it.
//!
//! ## Minimum Supported Rust Version (MSRV)
//!
//! Rust 1.75.0 or higher.

mod bridge;
mod builder;
mod dispatcher;
mod error;
mod logging;
mod notification;
mod schema;
mod tool;
mod value;

// === PUBLIC API ===
// Keep this minimal and stable!

// Server bootstrap
pub use crate::builder::McpServerBuilder;

// The running server / JSON-RPC dispatcher
pub use crate::dispatcher::ServerState;

// Type Bridge: decode/encode between JSON and typed Rust values
pub use crate::bridge::{decode, encode, DecodeErrorKind};

// Schema derivation
pub use crate::schema::schema_of;

// Tool Registry & Adapter
pub use crate::tool::{build_tool, ToolDescriptor, ToolOutcome, ToolRegistry};

// Notifications available to a running tool handler
pub use crate::notification::{Notification, NotificationCtx};

// Logging
pub use crate::logging::{init_tracing, LogLevel};

// Error types
pub use crate::error::{McpError, McpResult};

// Line framing (mostly useful to tests driving a server over a byte stream)
pub use crate::value::{parse_line, serialize_line};

// Re-export commonly used dependencies
pub use schemars::JsonSchema;
pub use serde_json::{json, Value};
