//! Tool registry: named, schema-described callables.
//!
//! A [`ToolSpec`] declares a tool's name, parameters, and return type.
//! Implementations of the [`Tool`] trait pair a spec with an async body.
//! Tools are collected once at startup through a [`RegistryBuilder`] and
//! frozen into an immutable [`Registry`]; after that, lookups are
//! lock-free and concurrent invocations need no coordination.
//!
//! # Example
//!
//! ```ignore
//! use registry::{ParamSpec, ParamType, Registry, ToolSpec};
//!
//! let registry = Registry::builder()
//!     .register(AddTool::new())?
//!     .register(ListFilesTool::new("."))?
//!     .build();
//!
//! let tool = registry.resolve("add")?;
//! let args = tool.spec().validate(serde_json::json!({"a": 2, "b": 3}))?;
//! ```

mod args;
mod errors;
mod registry;
mod spec;
mod tool;

pub use args::Arguments;
pub use errors::ToolError;
pub use registry::{Registry, RegistryBuilder};
pub use spec::{ParamSpec, ParamType, ToolSpec};
pub use tool::Tool;
