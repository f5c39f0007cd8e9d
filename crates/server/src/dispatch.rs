//! Invocation dispatch: resolve, validate, execute, wrap.

use std::sync::Arc;

use registry::{Registry, ToolError};
use tracing::{debug, warn};

use crate::invocation::{Invocation, InvocationRequest, InvocationResult, State};

/// Executes invocations against a frozen registry.
///
/// `dispatch` never returns an error: every failure mode (unknown tool,
/// bad arguments, a tool body that errors or panics) ends as a
/// `Failure` result with the invocation in the `Failed` state.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Run one invocation and return just its result.
    pub async fn invoke(&self, request: InvocationRequest) -> InvocationResult {
        self.dispatch(request).await.result
    }

    /// Run one invocation through the full state machine.
    pub async fn dispatch(&self, request: InvocationRequest) -> Invocation {
        let mut state = State::Received;
        debug!(id = %request.id, tool = %request.tool, %state, "invocation received");

        let tool = match self.registry.resolve(&request.tool) {
            Ok(tool) => Arc::clone(tool),
            Err(error) => return self.fail(&request, state, error),
        };

        let args = match tool.spec().validate(request.args.clone()) {
            Ok(args) => args,
            Err(error) => return self.fail(&request, state, error),
        };
        state = State::Validated;
        debug!(id = %request.id, tool = %request.tool, %state, "arguments validated");

        // Run the body on its own task so a panic is contained there
        // instead of unwinding through the server.
        let handle = tokio::spawn(async move { tool.call(args).await });
        match handle.await {
            Ok(Ok(output)) => {
                state = State::Executed;
                debug!(id = %request.id, tool = %request.tool, %state, "tool executed");
                let invocation = Invocation::completed(&request, output);
                debug!(id = %request.id, tool = %request.tool, state = %invocation.state, "invocation completed");
                invocation
            }
            Ok(Err(error)) => {
                state = State::Executed;
                self.fail(&request, state, error)
            }
            Err(join_error) => {
                let error = ToolError::Execution(panic_message(join_error));
                self.fail(&request, state, error)
            }
        }
    }

    fn fail(&self, request: &InvocationRequest, from: State, error: ToolError) -> Invocation {
        warn!(
            id = %request.id,
            tool = %request.tool,
            %from,
            kind = error.kind(),
            %error,
            "invocation failed"
        );
        Invocation::failed(request, error)
    }
}

fn panic_message(join_error: tokio::task::JoinError) -> String {
    if join_error.is_panic() {
        let payload = join_error.into_panic();
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic".to_string());
        format!("tool panicked: {message}")
    } else {
        "tool task was cancelled".to_string()
    }
}
