//! Large Message Handling Test
//!
//! The transport must support lines of at least 64 KiB rather than
//! truncate them. `tokio::io::AsyncBufReadExt::read_line` grows its
//! buffer to fit, so this exercises messages well past that floor.

mod common;

use common::StdioTestServer;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use toolmcp::{McpResult, McpServerBuilder, NotificationCtx};

struct Ctx;

#[derive(Deserialize, JsonSchema)]
struct TextInput {
    text: String,
}

#[derive(Serialize, JsonSchema)]
struct LengthOutput {
    length: usize,
}

async fn measure(input: TextInput, _ctx: Arc<Ctx>, _notif: NotificationCtx) -> McpResult<LengthOutput> {
    Ok(LengthOutput { length: input.text.len() })
}

fn server() -> toolmcp::ServerState<Ctx> {
    McpServerBuilder::new(Ctx, "large-message-test", "1.0.0")
        .with_tool("measure", "report the length of the given text", measure)
        .build()
}

async fn call_with_text_of_size(size: usize) -> serde_json::Value {
    let mut harness = StdioTestServer::start(server());
    harness
        .send_line(&json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}))
        .await;
    harness.recv_frames(2).await;

    let text = "x".repeat(size);
    harness
        .send_line(&json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {"name": "measure", "arguments": {"text": text}},
        }))
        .await;
    let frames = harness.recv_frames(1).await;
    harness.stop().await;
    frames.into_iter().next().unwrap()
}

#[tokio::test]
async fn handles_a_100kb_argument() {
    let response = call_with_text_of_size(100 * 1024).await;
    assert_eq!(response["result"]["content"][0]["text"]["length"], 100 * 1024);
}

#[tokio::test]
async fn handles_a_message_past_the_64kib_floor() {
    // Comfortably past the 64 KiB minimum line size.
    let response = call_with_text_of_size(300 * 1024).await;
    assert_eq!(response["result"]["content"][0]["text"]["length"], 300 * 1024);
}
