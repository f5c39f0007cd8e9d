//! Per-invocation types and the request state machine.

use registry::ToolError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A single request to execute a tool with given arguments.
///
/// Created per incoming call and consumed by one dispatch. The `id` is
/// generated here and only used for log correlation.
#[derive(Debug, Clone)]
pub struct InvocationRequest {
    pub id: Uuid,
    pub tool: String,
    pub args: Value,
}

impl InvocationRequest {
    pub fn new(tool: impl Into<String>, args: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            tool: tool.into(),
            args,
        }
    }
}

/// States an invocation moves through.
///
/// `Received → Validated → Executed → Completed`, with a transition to
/// `Failed` from any state on the corresponding error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum State {
    Received,
    Validated,
    Executed,
    Completed,
    Failed,
}

impl State {
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Completed | State::Failed)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            State::Received => "received",
            State::Validated => "validated",
            State::Executed => "executed",
            State::Completed => "completed",
            State::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// The outcome of one invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InvocationResult {
    Success { output: Value },
    Failure { error: ToolError },
}

impl InvocationResult {
    pub fn success(output: Value) -> Self {
        Self::Success { output }
    }

    pub fn failure(error: ToolError) -> Self {
        Self::Failure { error }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// A finished invocation: the request identity, the terminal state it
/// reached, and its result.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub id: Uuid,
    pub tool: String,
    pub state: State,
    pub result: InvocationResult,
}

impl Invocation {
    pub(crate) fn completed(request: &InvocationRequest, output: Value) -> Self {
        Self {
            id: request.id,
            tool: request.tool.clone(),
            state: State::Completed,
            result: InvocationResult::success(output),
        }
    }

    pub(crate) fn failed(request: &InvocationRequest, error: ToolError) -> Self {
        Self {
            id: request.id,
            tool: request.tool.clone(),
            state: State::Failed,
            result: InvocationResult::failure(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(State::Completed.is_terminal());
        assert!(State::Failed.is_terminal());
        assert!(!State::Received.is_terminal());
        assert!(!State::Validated.is_terminal());
        assert!(!State::Executed.is_terminal());
    }

    #[test]
    fn result_serializes_with_status_tag() {
        let result = InvocationResult::success(serde_json::json!(5));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"status\":\"success\""));
        assert!(json.contains("\"output\":5"));

        let result = InvocationResult::failure(ToolError::NotFound("nope".into()));
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"status\":\"failure\""));
    }

    #[test]
    fn requests_get_distinct_ids() {
        let a = InvocationRequest::new("add", serde_json::json!({}));
        let b = InvocationRequest::new("add", serde_json::json!({}));
        assert_ne!(a.id, b.id);
    }
}
