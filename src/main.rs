//! MCP Server Example
//!
//! A small demo server over stdio with one example tool, showing how to
//! wire up `McpServerBuilder` and run it.

use anyhow::Result;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use toolmcp::{init_tracing, McpResult, McpServerBuilder, NotificationCtx};

#[derive(Clone)]
struct AppContext;

#[derive(Deserialize, JsonSchema)]
struct EchoInput {
    message: String,
}

#[derive(Serialize, JsonSchema)]
struct EchoOutput {
    echoed: String,
}

async fn echo(
    input: EchoInput,
    _ctx: Arc<AppContext>,
    notif: NotificationCtx,
) -> McpResult<EchoOutput> {
    notif.info("echo", serde_json::json!({ "received": input.message }));
    Ok(EchoOutput { echoed: input.message })
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let mut server = McpServerBuilder::new(AppContext, "toolmcp-example", env!("CARGO_PKG_VERSION"))
        .with_tool("echo", "Echo the given message back", echo)
        .build();

    server.serve_stdio().await?;
    Ok(())
}
