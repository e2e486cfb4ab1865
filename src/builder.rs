//! Server bootstrap: a fluent `McpServerBuilder<C>` that owns an
//! application context `C`, registers tools, and produces a runnable
//! [`ServerState`] bound to stdio.

use std::future::Future;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{de::DeserializeOwned, Serialize};

use crate::dispatcher::ServerState;
use crate::error::McpResult;
use crate::notification::NotificationCtx;
use crate::tool::{build_tool, ToolRegistry};

/// Fluent builder for an MCP server over stdio. `C` is the application
/// context shared across every registered tool's handler, taking the
/// place a bare "allocator" parameter would have in a language without
/// Rust's ownership model (see DESIGN.md).
pub struct McpServerBuilder<C> {
    context: Arc<C>,
    name: String,
    version: String,
    registry: ToolRegistry<C>,
}

impl<C: Send + Sync + 'static> McpServerBuilder<C> {
    /// Start building a server. No environment variables, config files, or
    /// CLI flags are read here; construction is purely in-process.
    pub fn new(context: C, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            context: Arc::new(context),
            name: name.into(),
            version: version.into(),
            registry: ToolRegistry::new(),
        }
    }

    /// Register a typed tool. `handler` takes the decoded parameters, the
    /// shared context, and a [`NotificationCtx`] it can use to emit extra
    /// progress/log notifications while it runs.
    ///
    /// # Panics
    /// If a tool with this name was already registered; duplicate names
    /// are rejected rather than silently overwriting the first
    /// registration. This is treated as a server-setup programmer error,
    /// not a runtime condition, so it panics rather than returning a
    /// `Result` the fluent chain would have to thread through.
    pub fn with_tool<P, O, F, Fut>(
        mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        handler: F,
    ) -> Self
    where
        P: DeserializeOwned + JsonSchema + Send + 'static,
        O: Serialize + Send + 'static,
        F: Fn(P, Arc<C>, NotificationCtx) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = McpResult<O>> + Send + 'static,
    {
        let name = name.into();
        self.registry
            .register(build_tool(name.clone(), description, handler))
            .unwrap_or_else(|e| panic!("failed to register tool {name:?}: {e}"));
        self
    }

    /// Finalize registration and produce a server ready to drive over
    /// stdio (or, in tests, any line-framed `AsyncBufRead`/`AsyncWrite`
    /// pair via [`ServerState::serve`]).
    pub fn build(self) -> ServerState<C> {
        ServerState::new(self.context, self.name, self.version, self.registry)
    }
}
