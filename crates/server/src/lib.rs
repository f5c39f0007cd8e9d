//! Dispatch server: resolves, validates, and executes tool invocations.
//!
//! The [`Dispatcher`] is the transport-independent core. It takes an
//! [`InvocationRequest`], walks it through the per-request state machine
//! (received → validated → executed → completed, failing sideways on any
//! error), and always returns an [`InvocationResult`]; tool failures
//! never propagate.
//!
//! [`Server`] wraps a dispatcher with the MCP method surface
//! (`initialize`, `ping`, `tools/list`, `tools/call`), and [`serve`]
//! runs that surface over newline-delimited JSON-RPC on stdio.

mod dispatch;
mod error;
mod invocation;
mod server;
mod stdio;

pub use dispatch::Dispatcher;
pub use error::{Error, Result};
pub use invocation::{Invocation, InvocationRequest, InvocationResult, State};
pub use server::{Server, ServerConfig};
pub use stdio::{DEFAULT_MAX_REQUEST_BYTES, serve};
