//! Tool execution errors.

use serde_json::Value;
use thiserror::Error;

/// Errors a tool, the registry, or a restricted view can produce. All of
/// these are surfaced to the LLM as a `ToolResult::Error` — never as a Rust
/// panic or an opaque failure — except [`ToolError::Cancelled`], which must
/// propagate unchanged.
#[derive(Debug, Error)]
pub enum ToolError {
    /// `ToolRegistry.execute` was asked for a name it has no entry for.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The registry's fail-safe timeout fired before the tool finished.
    #[error("timeout ({0}ms)")]
    Timeout(u64),

    /// The tool itself failed.
    #[error("execution exception: {0}")]
    ExecutionFailed(String),

    /// A `RestrictedToolView` rejected a name outside its allow-list.
    #[error("PermissionError: tool not authorized")]
    PermissionDenied,

    /// `subagent_call`'s anti-recursion guard: ambient depth already at or
    /// past the agent definition's `max_depth`.
    #[error("depth exceeded")]
    DepthExceeded,

    /// Arguments failed to validate against the tool's schema.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// The call was cancelled. Must never be converted to any other
    /// variant, and must be re-raised by every tool wrapper rather than
    /// caught and reported as a normal error.
    #[error("cancelled")]
    Cancelled,
}

/// The typed outcome of running a [`crate::Tool`]: structured success data,
/// or an error. Serialized to the canonical wire string by
/// [`crate::canonical_json`].
pub type ToolExecResult = Result<Value, ToolError>;
