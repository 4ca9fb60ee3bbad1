//! The normalized event vocabulary emitted by the execution engine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One step of an execution's progress, serialized the same way regardless
/// of which transport eventually relays it.
///
/// `Thought` is only ever emitted by the deep ReAct loop — the bounded
/// fast-track loop has no intermediate reasoning to show. Every other
/// variant can come from either tier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EngineEvent {
    /// A coarse lifecycle marker, e.g. `"thinking"`, `"acting"`, `"routing"`.
    Status {
        /// The phase name.
        phase: String,
    },
    /// One step of exposed reasoning from the deep loop.
    Thought {
        /// 1-based step number within the execution.
        step: u32,
        /// The model's stated reasoning for this step.
        content: String,
    },
    /// A tool invocation is starting.
    ToolCall {
        /// Step number, when the emitting loop tracks steps (`None` for L1).
        step: Option<u32>,
        /// The tool's registered name.
        name: String,
        /// The arguments passed to it.
        arguments: Value,
    },
    /// A tool invocation finished.
    ToolResult {
        /// Step number, when the emitting loop tracks steps (`None` for L1).
        step: Option<u32>,
        /// The tool's registered name.
        name: String,
        /// The tool's canonical-JSON outcome.
        result: Value,
    },
    /// An incremental fragment of the final reply text.
    Delta {
        /// The text fragment.
        text: String,
    },
    /// The engine needs more information from the user before continuing.
    Clarify {
        /// The question to surface to the user.
        question: String,
        /// The session this clarification belongs to.
        session_id: String,
    },
    /// The execution has completed and produced a final reply.
    Finish {
        /// Number of reasoning iterations taken (L1 steps or L3 iterations).
        iterations: u32,
        /// Total tokens consumed across the execution.
        tokens_used: u64,
        /// Whether the reply was produced by graceful degradation rather
        /// than a normal stop.
        is_degraded: bool,
        /// The reason for degradation, present only when `is_degraded`.
        degrade_reason: Option<String>,
    },
    /// The execution failed outright.
    Error {
        /// A human-readable description of the failure.
        message: String,
    },
}

impl EngineEvent {
    /// Build a [`EngineEvent::Status`].
    pub fn status(phase: impl Into<String>) -> Self {
        Self::Status { phase: phase.into() }
    }

    /// Build a [`EngineEvent::Thought`].
    pub fn thought(step: u32, content: impl Into<String>) -> Self {
        Self::Thought { step, content: content.into() }
    }

    /// Build a [`EngineEvent::ToolCall`].
    pub fn tool_call(step: Option<u32>, name: impl Into<String>, arguments: Value) -> Self {
        Self::ToolCall { step, name: name.into(), arguments }
    }

    /// Build a [`EngineEvent::ToolResult`].
    pub fn tool_result(step: Option<u32>, name: impl Into<String>, result: Value) -> Self {
        Self::ToolResult { step, name: name.into(), result }
    }

    /// Build a [`EngineEvent::Delta`].
    pub fn delta(text: impl Into<String>) -> Self {
        Self::Delta { text: text.into() }
    }

    /// Build a [`EngineEvent::Clarify`].
    pub fn clarify(question: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self::Clarify { question: question.into(), session_id: session_id.into() }
    }

    /// Build a [`EngineEvent::Finish`].
    pub fn finish(iterations: u32, tokens_used: u64, is_degraded: bool, degrade_reason: Option<String>) -> Self {
        Self::Finish { iterations, tokens_used, is_degraded, degrade_reason }
    }

    /// Build a [`EngineEvent::Error`].
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error { message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_event_serializes_with_tagged_type() {
        let event = EngineEvent::status("thinking");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "status");
        assert_eq!(json["phase"], "thinking");
    }

    #[test]
    fn finish_event_round_trips() {
        let event = EngineEvent::finish(4, 512, true, Some("timeout".to_string()));
        let json = serde_json::to_string(&event).unwrap();
        let parsed: EngineEvent = serde_json::from_str(&json).unwrap();
        assert!(matches!(parsed, EngineEvent::Finish { iterations: 4, is_degraded: true, .. }));
    }

    #[test]
    fn tool_call_preserves_arguments() {
        let event = EngineEvent::tool_call(Some(2), "web_search", serde_json::json!({"q": "rust"}));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["name"], "web_search");
        assert_eq!(json["arguments"]["q"], "rust");
    }
}
