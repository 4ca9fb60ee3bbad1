//! SubAgent loading and invocation errors.

use thiserror::Error;

/// Errors from loading or invoking SubAgents.
#[derive(Debug, Error)]
pub enum SubAgentError {
    /// `subagent_call` was given a name with no registered definition.
    #[error("unknown sub-agent: {0}")]
    UnknownAgent(String),

    /// The ambient `agent_depth` has reached the agent's own `max_depth`.
    #[error("depth exceeded")]
    DepthExceeded,

    /// A definition file (`AGENT.md`) failed its type's validation.
    #[error("invalid sub-agent definition at {path}: {reason}")]
    InvalidDefinition {
        /// Path to the offending file.
        path: String,
        /// What was missing or malformed.
        reason: String,
    },

    /// `local_code` named an `entry` with no matching registered executor.
    #[error("no code executor registered for entry: {0}")]
    CodeExecutorNotRegistered(String),

    /// A `local_code` executor returned an error.
    #[error("code executor failed: {0}")]
    CodeExecutionFailed(String),

    /// The `http` backend's request itself failed (connection, timeout,
    /// non-2xx, ...).
    #[error("http sub-agent request failed: {0}")]
    HttpRequestFailed(String),

    /// The `http` backend's response body had neither a `reply` nor a
    /// `result` field.
    #[error("http sub-agent response missing reply/result field")]
    HttpResponseMalformed,
}

/// Result type for SubAgent operations.
pub type SubAgentResult<T> = Result<T, SubAgentError>;
