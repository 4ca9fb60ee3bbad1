//! Runtime error types.

use thiserror::Error;

/// Errors produced by the execution core: the Think→Act→Observe loop,
/// the two engine tiers, the router, and the meta-tools.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// The LLM abstraction itself failed (not a tool, not a budget).
    #[error("LLM error: {0}")]
    Llm(#[from] weave_llm::LlmError),

    /// A `subagent_call` named an agent with no registered definition.
    #[error("unknown sub-agent: {0}")]
    UnknownSubAgent(String),

    /// The ambient `agent_depth` has reached the target agent's `max_depth`.
    #[error("depth exceeded")]
    DepthExceeded,

    /// A `skill_call`/`skill_exec` named a skill with no registered
    /// definition.
    #[error("skill not found: {0}")]
    SkillNotFound(String),

    /// `skill_exec` was asked for a `(skill, script)` pair outside that
    /// skill's allow-list.
    #[error("script not in allowlist: {skill}/{script}")]
    ScriptNotInAllowlist {
        /// Skill name.
        skill: String,
        /// Script name requested.
        script: String,
    },

    /// A `skill_exec` subprocess was killed because its timeout elapsed.
    /// Distinct from a normal non-zero exit — the process tree was torn
    /// down rather than having simply failed on its own.
    #[error("script timed out after {0}ms and was killed")]
    ScriptTimedOut(u64),

    /// A `skill_exec` subprocess exited non-zero.
    #[error("script exited with status {status}: {stderr}")]
    ScriptFailed {
        /// Process exit status, if the OS reported one.
        status: String,
        /// Captured stderr.
        stderr: String,
    },

    /// A `skill_exec` subprocess's stdout was not valid JSON.
    #[error("non-JSON output from script")]
    ScriptOutputNotJson,

    /// Spawning or communicating with a `skill_exec` subprocess failed at
    /// the OS level.
    #[error("I/O error running script: {0}")]
    ScriptIo(#[from] std::io::Error),

    /// A `local_code` sub-agent's `entry` has no registered executor.
    #[error("no code executor registered for entry: {0}")]
    CodeExecutorNotRegistered(String),

    /// A `local_code` sub-agent's executor returned an error.
    #[error("code executor failed: {0}")]
    CodeExecutionFailed(String),

    /// An `http` sub-agent's request failed.
    #[error("http sub-agent request failed: {0}")]
    HttpRequestFailed(String),

    /// An `http` sub-agent's response had neither `reply` nor `result`.
    #[error("http sub-agent response missing reply/result field")]
    HttpResponseMalformed,

    /// The call was cancelled. Must never be converted to any other
    /// variant.
    #[error("cancelled")]
    Cancelled,
}

impl From<weave_subagents::SubAgentError> for RuntimeError {
    fn from(err: weave_subagents::SubAgentError) -> Self {
        use weave_subagents::SubAgentError as E;
        match err {
            E::UnknownAgent(name) => Self::UnknownSubAgent(name),
            E::DepthExceeded => Self::DepthExceeded,
            E::InvalidDefinition { path, reason } => {
                Self::CodeExecutionFailed(format!("invalid definition at {path}: {reason}"))
            },
            E::CodeExecutorNotRegistered(entry) => Self::CodeExecutorNotRegistered(entry),
            E::CodeExecutionFailed(reason) => Self::CodeExecutionFailed(reason),
            E::HttpRequestFailed(reason) => Self::HttpRequestFailed(reason),
            E::HttpResponseMalformed => Self::HttpResponseMalformed,
        }
    }
}

impl From<weave_skills::SkillError> for RuntimeError {
    fn from(err: weave_skills::SkillError) -> Self {
        use weave_skills::SkillError as E;
        match err {
            E::SkillNotFound(name) => Self::SkillNotFound(name),
            E::ScriptNotInAllowlist { skill, script } => Self::ScriptNotInAllowlist { skill, script },
            E::InvalidDefinition { path, reason } => {
                Self::SkillNotFound(format!("{path}: {reason}"))
            },
            E::Io { path, source } => Self::ScriptIo(std::io::Error::new(source.kind(), path)),
        }
    }
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
