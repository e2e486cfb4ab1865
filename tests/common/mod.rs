//! Shared MCP Test Helpers
//!
//! Common utilities for driving a `toolmcp` server end-to-end over its
//! real stdio transport shape (a line-framed duplex stream) rather than
//! calling the dispatcher's internals directly.

use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt, DuplexStream};
use tokio::time::timeout;

/// A running server, driven over an in-memory duplex pair standing in
/// for stdin/stdout, plus the client-side halves the test writes
/// requests to and reads responses from.
pub struct StdioTestServer {
    pub client_write: tokio::io::WriteHalf<DuplexStream>,
    pub client_read: tokio::io::ReadHalf<DuplexStream>,
    server_handle: tokio::task::JoinHandle<()>,
}

impl StdioTestServer {
    /// Spawn `state.serve(...)` over a duplex pair and hand back the
    /// client-facing halves.
    pub fn start<C: Send + Sync + 'static>(mut state: toolmcp::ServerState<C>) -> Self {
        let (client, server) = tokio::io::duplex(64 * 1024);
        let (server_read, server_write) = tokio::io::split(server);
        let server_handle = tokio::spawn(async move {
            let _ = state
                .serve(tokio::io::BufReader::new(server_read), server_write)
                .await;
        });
        let (client_read, client_write) = tokio::io::split(client);
        Self { client_write, client_read, server_handle }
    }

    /// Write one JSON-RPC frame, newline-terminated as the transport
    /// requires.
    pub async fn send_line(&mut self, body: &serde_json::Value) {
        let mut line = serde_json::to_string(body).unwrap();
        line.push('\n');
        self.client_write.write_all(line.as_bytes()).await.unwrap();
    }

    /// Read exactly `count` newline-terminated JSON frames, failing the
    /// test if they don't show up within the timeout (a hung dispatcher
    /// should fail loudly, not wedge the test suite).
    pub async fn recv_frames(&mut self, count: usize) -> Vec<serde_json::Value> {
        let mut collected = Vec::new();
        let mut buf = Vec::new();
        let mut byte = [0u8; 1];
        while collected.len() < count {
            let n = timeout(Duration::from_secs(5), self.client_read.read(&mut byte))
                .await
                .expect("timed out waiting for a response frame")
                .unwrap();
            assert_ne!(n, 0, "transport closed before all expected frames arrived");
            if byte[0] == b'\n' {
                let line = String::from_utf8(std::mem::take(&mut buf)).unwrap();
                collected.push(serde_json::from_str(&line).unwrap());
            } else {
                buf.push(byte[0]);
            }
        }
        collected
    }

    /// Drop the client write half and join the server task, observing a
    /// clean EOF-driven shutdown.
    pub async fn stop(self) {
        drop(self.client_write);
        let _ = self.server_handle.await;
    }
}
