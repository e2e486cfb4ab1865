//! The wire value model.
//!
//! A JSON-RPC frame on this transport is one UTF-8 line. This module owns
//! the line-level parse/serialize boundary; everything past it works with
//! plain `serde_json::Value`, the idiomatic Rust stand-in for the
//! `Null | Bool | Int | Float | String | Array | Object` tagged union
//! a JSON-RPC frame needs (`serde_json::Number` already distinguishes the
//! integer/float cases internally).

use crate::error::{McpError, McpResult};
use serde_json::Value;

/// Parse one transport line into a `Value`.
///
/// UTF-8 is validated explicitly before handing the bytes to `serde_json`
/// so a decoding failure is reported distinctly from a JSON syntax error.
pub fn parse_line(bytes: &[u8]) -> McpResult<Value> {
    std::str::from_utf8(bytes)
        .map_err(|e| McpError::ParseError(format!("invalid UTF-8: {e}")))?;
    serde_json::from_slice(bytes).map_err(|e| McpError::ParseError(e.to_string()))
}

/// Serialize a `Value` to a single line (no trailing newline; the caller
/// appends `\n` when writing to the transport, preserving the invariant
/// (c): one line, no embedded newlines, valid UTF-8).
///
/// When `omit_null_optional_fields` is set, object keys whose value is
/// `Null` are dropped before serializing, so an absent
/// `Option<T>` field disappears from the wire object instead of showing
/// up as an explicit `null`.
pub fn serialize_line(value: &Value, omit_null_optional_fields: bool) -> String {
    if omit_null_optional_fields {
        let stripped = strip_nulls(value.clone());
        serde_json::to_string(&stripped).expect("Value always serializes")
    } else {
        serde_json::to_string(value).expect("Value always serializes")
    }
}

fn strip_nulls(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (k, v) in map {
                if v.is_null() {
                    continue;
                }
                out.insert(k, strip_nulls(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(strip_nulls).collect()),
        other => other,
    }
}
