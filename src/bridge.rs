//! The type bridge: decode a raw `Value` into a handler's typed
//! parameters, and encode a handler's typed result back into a `Value`.
//!
//! This module stays agnostic of JSON-RPC/MCP error codes; that mapping
//! belongs to the adapter (`tool.rs`) and dispatcher, which turn a
//! [`DecodeErrorKind`] or a serialize failure into the wire-level text the
//! protocol expects. `decode`/`encode` only ever talk about the value shape.

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Why a decode attempt failed, coarser than `serde_json::Error` but
/// specific enough for a caller to react to a particular field (this
/// names these four kinds: a value present but the wrong shape, a value
/// present but out of range/otherwise invalid, a collection of the wrong
/// length, and a required field missing entirely).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeErrorKind {
    InvalidType,
    InvalidValue,
    InvalidLength,
    MissingField(String),
}

impl std::fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidType => write!(f, "invalid type"),
            Self::InvalidValue => write!(f, "invalid value"),
            Self::InvalidLength => write!(f, "invalid length"),
            Self::MissingField(name) => write!(f, "missing field `{name}`"),
        }
    }
}

/// Classify a `serde_json` deserialization failure into a [`DecodeErrorKind`].
///
/// `serde_json::Error::classify()` only distinguishes Io/Syntax/Data/Eof;
/// within `Data` (the case that matters once the raw bytes are already
/// valid JSON) we fall back to matching the message serde's derive macros
/// produce, since serde doesn't expose a structured error kind.
pub fn classify_decode_error(err: &serde_json::Error) -> DecodeErrorKind {
    let msg = err.to_string();
    if let Some(rest) = msg.strip_prefix("missing field `") {
        if let Some(name) = rest.split('`').next() {
            return DecodeErrorKind::MissingField(name.to_string());
        }
    }
    if msg.contains("invalid length") {
        return DecodeErrorKind::InvalidLength;
    }
    if msg.contains("invalid type") {
        // serde's own integer visitors reject a float that doesn't
        // round-trip through the target width with this exact message
        // shape ("invalid type: floating point `5.5`, expected i64").
        // That is a value out of an integer field's domain, not a type
        // mismatch, so classify it as InvalidValue.
        if msg.contains("floating point") {
            return DecodeErrorKind::InvalidValue;
        }
        return DecodeErrorKind::InvalidType;
    }
    // Range violations, unknown enum variants, and similar semantic
    // rejections all surface as "invalid value: ..." from serde derives.
    DecodeErrorKind::InvalidValue
}

/// Normalize numeric leaves so a JSON float with no fractional part can
/// decode into an integer-typed field. serde_json
/// refuses `5.0` where a `u64`/`i64` is expected; this walks the tree
/// up front and rewrites any such float into the matching integer
/// `serde_json::Number`, after which `serde_json::from_value` just works.
pub fn normalize_numbers(value: Value) -> Value {
    match value {
        Value::Number(n) => {
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.is_finite() {
                    if let Some(i) = f_to_i64(f) {
                        return Value::Number(i.into());
                    }
                    if f >= 0.0 {
                        if let Some(u) = f_to_u64(f) {
                            return Value::Number(u.into());
                        }
                    }
                }
            }
            Value::Number(n)
        }
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_numbers).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, normalize_numbers(v)))
                .collect(),
        ),
        other => other,
    }
}

fn f_to_i64(f: f64) -> Option<i64> {
    if f >= i64::MIN as f64 && f <= i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

fn f_to_u64(f: f64) -> Option<u64> {
    if f >= 0.0 && f <= u64::MAX as f64 {
        Some(f as u64)
    } else {
        None
    }
}

/// Decode a raw `Value` into `P`, applying numeric normalization first.
pub fn decode<P: DeserializeOwned>(value: Value) -> Result<P, DecodeErrorKind> {
    let normalized = normalize_numbers(value);
    serde_json::from_value(normalized).map_err(|e| classify_decode_error(&e))
}

/// Encode a handler's typed result back into a `Value`. Only fails if `O`'s
/// `Serialize` impl itself fails (e.g. a non-string map key), not a
/// decode-shaped error, so this keeps `serde_json::Error` rather than
/// [`DecodeErrorKind`].
pub fn encode<O: Serialize>(value: &O) -> Result<Value, serde_json::Error> {
    serde_json::to_value(value)
}
