//! Tool registry and adapter: wraps a typed handler function in a
//! schema-carrying descriptor, and collects descriptors into an
//! insertion-ordered registry a dispatcher can list and call by name.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::bridge::{decode, encode};
use crate::error::{McpError, McpResult};
use crate::notification::NotificationCtx;

/// What invoking a tool produced, already classified into the two universes
/// here: a protocol-level success/failure split is handled
/// one layer up by the dispatcher (tool errors are never JSON-RPC errors).
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    /// The handler ran and its result encoded cleanly.
    Success(Value),
    /// Arguments weren't an object, decoding failed, or the handler itself
    /// returned its failure variant. Carries the exact message text
    /// this module uses (`"Arguments must be an object"`,
    /// `"Invalid parameters: <ErrorKind>"`, `"Function call failed:
    /// <ErrorName>"`).
    Failure(String),
}

/// A registered tool's boxed, type-erased call: takes the shared context,
/// a notification handle scoped to this call, and the raw JSON params;
/// returns a [`ToolOutcome`] (never panics, never propagates a Rust error,
/// an invariant `invoke` upholds: it never throws).
pub type ToolFunction<C> = Arc<
    dyn Fn(Arc<C>, NotificationCtx, Value) -> Pin<Box<dyn Future<Output = ToolOutcome> + Send>>
        + Send
        + Sync,
>;

/// Everything the dispatcher needs to advertise and invoke one tool.
#[derive(Clone)]
pub struct ToolDescriptor<C> {
    pub name: String,
    pub description: String,
    pub schema: Value,
    pub(crate) call: ToolFunction<C>,
}

impl<C> std::fmt::Debug for ToolDescriptor<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("schema", &self.schema)
            .finish()
    }
}

impl<C> ToolDescriptor<C> {
    /// Run this tool's adapter: decode `params`, invoke the handler, encode
    /// the result. `ctx` is the shared application context; `notif` lets
    /// the handler emit extra progress/log notifications mid-call.
    pub async fn invoke(&self, ctx: Arc<C>, notif: NotificationCtx, params: Value) -> ToolOutcome {
        (self.call)(ctx, notif, params).await
    }

    /// The `tools/list` entry for this tool.
    pub fn to_json(&self) -> Value {
        serde_json::json!({
            "name": self.name,
            "description": self.description,
            "inputSchema": self.schema,
        })
    }
}

/// Build a [`ToolDescriptor`] from a typed async handler
/// `F: Fn(P, Arc<C>, NotificationCtx) -> impl Future<Output = McpResult<O>>`.
///
/// The returned descriptor's `call` closure does exactly what
/// the adapter is responsible for, one step per `invoke`
/// steps (b)-(f):
/// - non-object arguments -> `Failure("Arguments must be an object")`
/// - a Type Bridge decode failure -> `Failure("Invalid parameters: <kind>")`
/// - a handler failure -> `Failure("Function call failed: <ErrorName>")`
/// - otherwise -> `Success(encoded result)`
pub fn build_tool<C, P, O, F, Fut>(
    name: impl Into<String>,
    description: impl Into<String>,
    handler: F,
) -> ToolDescriptor<C>
where
    C: Send + Sync + 'static,
    P: DeserializeOwned + JsonSchema + Send + 'static,
    O: Serialize + Send + 'static,
    F: Fn(P, Arc<C>, NotificationCtx) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = McpResult<O>> + Send + 'static,
{
    let handler = Arc::new(handler);
    let call: ToolFunction<C> = Arc::new(move |ctx, notif, raw_params| {
        let handler = Arc::clone(&handler);
        Box::pin(async move {
            if !raw_params.is_object() {
                return ToolOutcome::Failure("Arguments must be an object".to_string());
            }
            let params: P = match decode(raw_params) {
                Ok(p) => p,
                Err(kind) => return ToolOutcome::Failure(format!("Invalid parameters: {kind}")),
            };
            match handler(params, ctx, notif).await {
                Ok(result) => match encode(&result) {
                    Ok(v) => ToolOutcome::Success(v),
                    Err(e) => ToolOutcome::Failure(format!("Function call failed: {e}")),
                },
                Err(e) => ToolOutcome::Failure(format!("Function call failed: {e}")),
            }
        })
    });

    ToolDescriptor {
        name: name.into(),
        description: description.into(),
        schema: crate::schema::schema_of::<P>(),
        call,
    }
}

/// Insertion-ordered collection of tool descriptors, keyed by name.
///
/// Registration order is preserved (`tools/list` returns tools
/// in the order they were registered), and registering a second tool under
/// a name already present is rejected rather than silently overwriting the
/// first.
pub struct ToolRegistry<C> {
    order: Vec<String>,
    by_name: HashMap<String, ToolDescriptor<C>>,
}

impl<C> Default for ToolRegistry<C> {
    fn default() -> Self {
        Self { order: Vec::new(), by_name: HashMap::new() }
    }
}

impl<C> ToolRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool, or fail if its name is already taken.
    pub fn register(&mut self, descriptor: ToolDescriptor<C>) -> McpResult<()> {
        if self.by_name.contains_key(&descriptor.name) {
            return Err(McpError::DuplicateTool(descriptor.name.clone()));
        }
        self.order.push(descriptor.name.clone());
        self.by_name.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ToolDescriptor<C>> {
        self.by_name.get(name)
    }

    /// Tools in registration order, as used by the `tools/list` response.
    pub fn iter(&self) -> impl Iterator<Item = &ToolDescriptor<C>> {
        self.order.iter().map(move |n| &self.by_name[n])
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
