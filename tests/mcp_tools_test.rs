//! MCP Tools Test
//!
//! Tests `tools/list` and `tools/call` against a server with several
//! registered tools, covering schema shape, decode coercion, and the
//! tool-error-as-success-result contract.

mod common;

use common::StdioTestServer;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use toolmcp::{McpResult, McpServerBuilder, NotificationCtx};

#[derive(Clone)]
struct AppContext;

#[derive(Deserialize, JsonSchema)]
struct EchoInput {
    message: String,
    #[serde(default = "default_count")]
    count: u32,
}

fn default_count() -> u32 {
    1
}

#[derive(Serialize, JsonSchema)]
struct EchoOutput {
    echoed: String,
}

async fn echo(input: EchoInput, _ctx: Arc<AppContext>, _notif: NotificationCtx) -> McpResult<EchoOutput> {
    Ok(EchoOutput { echoed: input.message.repeat(input.count as usize) })
}

#[derive(Deserialize, JsonSchema)]
struct DivideInput {
    numerator: f64,
    denominator: f64,
}

async fn divide(input: DivideInput, _ctx: Arc<AppContext>, _notif: NotificationCtx) -> McpResult<f64> {
    if input.denominator == 0.0 {
        return Err(toolmcp::McpError::InvalidParams("denominator must be nonzero".into()));
    }
    Ok(input.numerator / input.denominator)
}

fn server() -> toolmcp::ServerState<AppContext> {
    McpServerBuilder::new(AppContext, "tools-test", "1.0.0")
        .with_tool("echo", "Echo the input message back, repeated `count` times", echo)
        .with_tool("divide", "Divide two numbers", divide)
        .build()
}

async fn initialized() -> StdioTestServer {
    let mut harness = StdioTestServer::start(server());
    harness
        .send_line(&json!({"jsonrpc": "2.0", "id": 1, "method": "initialize", "params": {}}))
        .await;
    harness.recv_frames(2).await;
    harness
}

#[tokio::test]
async fn tools_list_reports_both_tools_in_registration_order() {
    let mut harness = initialized().await;

    harness.send_line(&json!({"jsonrpc": "2.0", "id": 2, "method": "tools/list"})).await;
    let frames = harness.recv_frames(1).await;
    let tools = frames[0]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0]["name"], "echo");
    assert_eq!(tools[1]["name"], "divide");

    let echo_schema = &tools[0]["inputSchema"];
    assert_eq!(echo_schema["type"], "object");
    assert_eq!(echo_schema["required"], json!(["message"]));

    harness.stop().await;
}

#[tokio::test]
async fn tools_call_happy_path_decodes_invokes_and_encodes() {
    let mut harness = initialized().await;

    harness
        .send_line(&json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {"name": "echo", "arguments": {"message": "ab", "count": 3}},
        }))
        .await;
    let frames = harness.recv_frames(1).await;
    assert_eq!(frames[0]["result"]["isError"], false);
    assert_eq!(frames[0]["result"]["content"][0]["text"], "ababab");

    harness.stop().await;
}

#[tokio::test]
async fn integer_valued_float_coerces_into_an_integer_field_over_the_wire() {
    let mut harness = initialized().await;

    // `count` is a u32 but the client sends `3.0`, a whole-valued float.
    harness
        .send_line(&json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {"name": "echo", "arguments": {"message": "x", "count": 3.0}},
        }))
        .await;
    let frames = harness.recv_frames(1).await;
    assert_eq!(frames[0]["result"]["content"][0]["text"], "xxx");

    harness.stop().await;
}

#[tokio::test]
async fn handler_failure_surfaces_as_a_tool_error_not_a_protocol_error() {
    let mut harness = initialized().await;

    harness
        .send_line(&json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {"name": "divide", "arguments": {"numerator": 1.0, "denominator": 0.0}},
        }))
        .await;
    let frames = harness.recv_frames(1).await;
    assert!(frames[0]["error"].is_null());
    assert_eq!(frames[0]["result"]["isError"], true);
    assert!(frames[0]["result"]["content"][0]["text"]
        .as_str()
        .unwrap()
        .starts_with("Function call failed:"));

    harness.stop().await;
}

#[tokio::test]
async fn calling_an_unregistered_tool_is_method_not_found() {
    let mut harness = initialized().await;

    harness
        .send_line(&json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {"name": "nonexistent", "arguments": {}},
        }))
        .await;
    let frames = harness.recv_frames(1).await;
    assert_eq!(frames[0]["error"]["code"], -32601);

    harness.stop().await;
}
