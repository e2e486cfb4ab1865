//! JSON Schema derivation for tool parameter and result types.

use schemars::JsonSchema;
use serde_json::Value;

/// Derive the JSON Schema for `T` and return it as a plain `Value`, the
/// shape the MCP `tools/list` response embeds under `inputSchema`.
///
/// `schemars` already emits `minItems`/`maxItems` for fixed-length arrays
/// (`[T; N]`), which is the conservative reading of the Open Question
/// bounding a fixed-length array's size in its schema.
pub fn schema_of<T: JsonSchema>() -> Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema).expect("a generated schema always serializes")
}
