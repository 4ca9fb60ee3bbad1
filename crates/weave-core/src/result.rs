//! `ExecutionResult`: the outbound record produced by either engine tier.

use serde::{Deserialize, Serialize};

use crate::trace::{ReasoningTrace, TokenUsage};

/// Which engine tier produced an [`ExecutionResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ExecutionSource {
    /// `L1FastTrack`.
    L1,
    /// `L3ReActEngine`.
    L3,
}

/// A single recorded tool invocation, surfaced to the caller alongside the
/// reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallSummary {
    /// Name of the invoked tool.
    pub tool_name: String,
    /// The LLM-assigned call id.
    pub tool_call_id: String,
    /// Arguments the LLM supplied.
    pub arguments: serde_json::Value,
    /// Canonical JSON result string (`{"status":"success",...}` /
    /// `{"status":"error","error":...}`).
    pub result_json: String,
    /// Wall-clock duration of the tool call.
    pub duration_ms: u64,
}

/// Outcome of one `ExecutionRouter` dispatch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionResult {
    /// The final reply text shown to the user.
    pub reply: String,
    /// Every tool call made during this execution, in chronological order.
    pub tool_calls: Vec<ToolCallSummary>,
    /// Which tier produced this result.
    pub source: ExecutionSource,
    /// Wall-clock duration of the whole execution.
    pub duration_ms: u64,
    /// The full reasoning trace (`L3` only).
    pub reasoning_trace: Option<ReasoningTrace>,
    /// Number of Think→Act iterations performed (`L3` only; `L1FastTrack`
    /// reports its own step count here too for symmetry).
    pub iterations: usize,
    /// Aggregate token usage across the whole execution.
    pub token_usage: TokenUsage,
    /// True when the engine hit a budget/timeout and returned a synthesized
    /// partial answer rather than a model-produced final reply.
    pub is_degraded: bool,
    /// Why degradation happened (`"timeout"` / `"budget"`), if it did.
    pub degrade_reason: Option<String>,
}

impl ExecutionResult {
    /// Build a non-degraded `L1` result with no reasoning trace.
    #[must_use]
    pub fn l1(
        reply: impl Into<String>,
        tool_calls: Vec<ToolCallSummary>,
        duration_ms: u64,
        token_usage: TokenUsage,
    ) -> Self {
        let iterations = 1 + usize::from(!tool_calls.is_empty());
        Self {
            reply: reply.into(),
            tool_calls,
            source: ExecutionSource::L1,
            duration_ms,
            reasoning_trace: None,
            iterations,
            token_usage,
            is_degraded: false,
            degrade_reason: None,
        }
    }
}
