//! Tool registry — built once at startup, immutable afterwards.

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::ToolError;
use crate::spec::ToolSpec;
use crate::tool::Tool;

/// Collects tools at startup and freezes them into a [`Registry`].
#[derive(Default)]
pub struct RegistryBuilder {
    tools: Vec<Arc<dyn Tool>>,
}

impl std::fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("tools", &self.tools.len())
            .finish()
    }
}

impl RegistryBuilder {
    /// Register a tool, failing if its name is already taken.
    pub fn register(self, tool: impl Tool + 'static) -> Result<Self, ToolError> {
        self.register_arc(Arc::new(tool))
    }

    pub fn register_arc(mut self, tool: Arc<dyn Tool>) -> Result<Self, ToolError> {
        let name = &tool.spec().name;
        if self.tools.iter().any(|t| &t.spec().name == name) {
            return Err(ToolError::DuplicateName(name.clone()));
        }
        self.tools.push(tool);
        Ok(self)
    }

    /// Freeze into an immutable registry.
    pub fn build(self) -> Registry {
        let index = self
            .tools
            .iter()
            .enumerate()
            .map(|(i, tool)| (tool.spec().name.clone(), i))
            .collect();
        Registry {
            tools: self.tools,
            index,
        }
    }
}

/// Immutable mapping from tool name to registered tool.
///
/// Shared via `Arc`; reads need no locking, so concurrent invocations
/// can resolve in parallel.
pub struct Registry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Look up a tool by name.
    pub fn resolve(&self, name: &str) -> Result<&Arc<dyn Tool>, ToolError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| ToolError::NotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Specs in registration order.
    pub fn specs(&self) -> impl Iterator<Item = &ToolSpec> {
        self.tools.iter().map(|t| t.spec())
    }

    /// Wire-format tool listing, in registration order.
    pub fn listing(&self) -> Vec<protocol::Tool> {
        self.specs().map(protocol::Tool::from).collect()
    }
}
