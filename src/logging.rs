//! `ServerState.min_log_level` and the `logging/setLevel` wire
//! method, plus the `tracing` bootstrap the example binary uses.
//!
//! Two independent things are named "logging" here and they don't share a
//! filter: `tracing`'s `EnvFilter` (set once from `RUST_LOG`, read by
//! whoever is watching the process's own stderr) governs what the
//! *operator* sees; [`LogLevel`]/[`LogLevel::passes`] governs which
//! `notifications/message` frames get forwarded to the *MCP client* and is
//! mutated at runtime by `logging/setLevel`.

use serde::{Deserialize, Serialize};

/// Severity levels accepted by `logging/setLevel`, ordered least to most
/// verbose so `Ord` answers "should a message this severe be forwarded
/// given the client's requested minimum level".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Parse a `logging/setLevel` argument. Accepts `"warn"` as an alias
    /// for `"warning"` since both spellings show up in the wild.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "error" => Some(Self::Error),
            "warn" | "warning" => Some(Self::Warning),
            "info" => Some(Self::Info),
            "debug" => Some(Self::Debug),
            _ => None,
        }
    }

    /// Whether a notification at `self`'s severity should be delivered to a
    /// client whose requested minimum level is `min`.
    pub fn passes(self, min: LogLevel) -> bool {
        self <= min
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

/// Initialize the process-wide `tracing` subscriber for the example binary,
/// a small binary's usual bootstrap (`EnvFilter` driven by
/// `RUST_LOG`, defaulting to `info`).
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
