//! Notification context made available to a running tool handler, on top
//! of the progress sandwich and `notifications/message` logging.
//!
//! Covers the progress/log subset a tool handler needs; resource/prompt
//! "list changed" events have no counterpart here since Resources and
//! Prompts are out of scope.

use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;

use crate::logging::LogLevel;

/// A single outbound notification frame, queued by a running handler and
/// drained by the dispatcher's write loop after the handler returns.
#[derive(Debug, Clone)]
pub struct Notification {
    pub method: String,
    pub params: Value,
}

/// Handle a tool handler can hold onto to emit extra `$/progress` and log
/// notifications while it runs, on top of the two progress-sandwich frames
/// the dispatcher already emits automatically around every `tools/call`.
#[derive(Clone)]
pub struct NotificationCtx {
    tx: UnboundedSender<Notification>,
    progress_token: Option<Value>,
}

impl NotificationCtx {
    pub fn new(tx: UnboundedSender<Notification>, progress_token: Option<Value>) -> Self {
        Self { tx, progress_token }
    }

    /// Send a `$/progress` notification, a no-op if the call didn't carry
    /// a progress token. `total` is always present on the wire (`null`
    /// when not given).
    pub fn progress(&self, progress: f64, total: Option<f64>) {
        let Some(token) = self.progress_token.clone() else {
            return;
        };
        let params = serde_json::json!({
            "token": token,
            "progress": progress,
            "total": total,
        });
        let _ = self.tx.send(Notification { method: "$/progress".into(), params });
    }

    /// Send a structured log message notification, gated by nothing here;
    /// the dispatcher applies `ServerState.min_log_level` when it drains
    /// the channel.
    pub fn log(&self, level: LogLevel, logger: &str, data: impl Into<Value>) {
        let params = serde_json::json!({
            "level": level,
            "logger": logger,
            "data": data.into(),
        });
        let _ = self
            .tx
            .send(Notification { method: "notifications/message".into(), params });
    }

    pub fn debug(&self, logger: &str, data: impl Into<Value>) {
        self.log(LogLevel::Debug, logger, data);
    }

    pub fn info(&self, logger: &str, data: impl Into<Value>) {
        self.log(LogLevel::Info, logger, data);
    }

    pub fn warning(&self, logger: &str, data: impl Into<Value>) {
        self.log(LogLevel::Warning, logger, data);
    }

    pub fn error(&self, logger: &str, data: impl Into<Value>) {
        self.log(LogLevel::Error, logger, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn progress_is_a_no_op_without_a_token() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let ctx = NotificationCtx::new(tx, None);
        ctx.progress(0.5, Some(1.0));
        drop(ctx);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn progress_sends_when_token_present() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let ctx = NotificationCtx::new(tx, Some(serde_json::json!("tok-1")));
        ctx.progress(0.5, Some(1.0));
        let note = rx.recv().await.unwrap();
        assert_eq!(note.method, "$/progress");
        assert_eq!(note.params["token"], serde_json::json!("tok-1"));
        assert_eq!(note.params["progress"], 0.5);
        assert_eq!(note.params["total"], 1.0);
    }

    #[tokio::test]
    async fn progress_serializes_total_null_when_absent() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let ctx = NotificationCtx::new(tx, Some(serde_json::json!(1)));
        ctx.progress(0.0, None);
        let note = rx.recv().await.unwrap();
        assert_eq!(note.params["total"], serde_json::Value::Null);
        assert!(note.params.as_object().unwrap().contains_key("total"));
    }

    #[tokio::test]
    async fn log_notification_carries_level_and_data() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let ctx = NotificationCtx::new(tx, None);
        ctx.info("my-tool", serde_json::json!({"msg": "started"}));
        let note = rx.recv().await.unwrap();
        assert_eq!(note.method, "notifications/message");
        assert_eq!(note.params["data"]["msg"], "started");
        assert_eq!(note.params["level"], "info");
    }
}
