//! Tool trait.

use async_trait::async_trait;
use serde_json::Value;

use crate::args::Arguments;
use crate::errors::ToolError;
use crate::spec::ToolSpec;

/// A named, schema-described callable.
///
/// This is the boundary between dispatch and side effects: the dispatcher
/// validates arguments against `spec()` before `call` ever runs, so a
/// body can deserialize its arguments without re-checking presence or
/// types.
#[async_trait]
pub trait Tool: Send + Sync {
    /// The immutable specification this tool was registered with.
    fn spec(&self) -> &ToolSpec;

    /// Execute with validated arguments.
    async fn call(&self, args: Arguments) -> Result<Value, ToolError>;
}

impl std::fmt::Debug for dyn Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.spec().name)
            .finish()
    }
}
