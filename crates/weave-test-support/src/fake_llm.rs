//! A scriptable [`weave_llm::LlmProvider`] for deterministically driving the
//! L1/L3 loops through a known sequence of steps.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::stream;
use weave_llm::{
    LlmError, LlmProvider, LlmResponse, LlmResult, LlmToolDefinition, Message, StopReason,
    StreamBox, StreamEvent, Usage,
};

/// Queued behavior for one call to [`FakeLlmProvider::complete`] or
/// [`FakeLlmProvider::stream`].
#[derive(Debug, Clone)]
pub enum ScriptedTurn {
    /// Reply with plain text and stop.
    Text(String),
    /// Request one or more tool calls.
    ToolCalls(Vec<(String, String, serde_json::Value)>),
    /// Fail the call outright.
    Error(String),
}

/// Mock `LlmProvider` that replays a pre-programmed sequence of
/// [`ScriptedTurn`]s, one per call. Uses `std::sync::Mutex` internally so it
/// can be shared across the concurrently fanned-out tasks a test's engine
/// run may spawn.
#[derive(Debug, Clone)]
pub struct FakeLlmProvider {
    name: String,
    model: String,
    turns: Arc<Mutex<VecDeque<ScriptedTurn>>>,
    calls_made: Arc<Mutex<usize>>,
}

impl FakeLlmProvider {
    /// Create a provider with no turns queued. Calling `complete`/`stream`
    /// before queuing anything returns [`LlmError::ApiRequestFailed`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            name: "fake".to_string(),
            model: "fake-model".to_string(),
            turns: Arc::new(Mutex::new(VecDeque::new())),
            calls_made: Arc::new(Mutex::new(0)),
        }
    }

    /// Queue a plain-text final reply.
    #[must_use]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        if let Ok(mut guard) = self.turns.lock() {
            guard.push_back(ScriptedTurn::Text(text.into()));
        }
        self
    }

    /// Queue a tool-call turn: each entry is `(call_id, tool_name, arguments)`.
    #[must_use]
    pub fn with_tool_calls(self, calls: Vec<(String, String, serde_json::Value)>) -> Self {
        if let Ok(mut guard) = self.turns.lock() {
            guard.push_back(ScriptedTurn::ToolCalls(calls));
        }
        self
    }

    /// Queue a single tool call turn.
    #[must_use]
    pub fn with_tool_call(
        self,
        call_id: impl Into<String>,
        tool_name: impl Into<String>,
        arguments: serde_json::Value,
    ) -> Self {
        self.with_tool_calls(vec![(call_id.into(), tool_name.into(), arguments)])
    }

    /// Queue a turn that fails with a provider error.
    #[must_use]
    pub fn with_error(self, message: impl Into<String>) -> Self {
        if let Ok(mut guard) = self.turns.lock() {
            guard.push_back(ScriptedTurn::Error(message.into()));
        }
        self
    }

    /// Number of `complete`/`stream` calls made so far.
    #[must_use]
    pub fn calls_made(&self) -> usize {
        self.calls_made.lock().map(|g| *g).unwrap_or(0)
    }

    fn next_turn(&self) -> LlmResult<ScriptedTurn> {
        if let Ok(mut guard) = self.calls_made.lock() {
            *guard += 1;
        }
        self.turns
            .lock()
            .ok()
            .and_then(|mut g| g.pop_front())
            .ok_or_else(|| LlmError::ApiRequestFailed("FakeLlmProvider: no scripted turn queued".to_string()))
    }

    fn turn_to_response(turn: ScriptedTurn) -> LlmResponse {
        match turn {
            ScriptedTurn::Text(text) => LlmResponse {
                message: Message::assistant(text),
                has_tool_calls: false,
                stop_reason: StopReason::EndTurn,
                usage: Usage { input_tokens: 10, output_tokens: 10 },
            },
            ScriptedTurn::ToolCalls(calls) => {
                let tool_calls = calls
                    .into_iter()
                    .map(|(id, name, arguments)| weave_llm::ToolCall { id, name, arguments })
                    .collect();
                LlmResponse {
                    message: Message::assistant_with_tools(tool_calls),
                    has_tool_calls: true,
                    stop_reason: StopReason::ToolUse,
                    usage: Usage { input_tokens: 10, output_tokens: 10 },
                }
            },
            ScriptedTurn::Error(_) => unreachable!("errors are short-circuited before this point"),
        }
    }
}

impl Default for FakeLlmProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmProvider for FakeLlmProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn stream(
        &self,
        _messages: &[Message],
        _tools: &[LlmToolDefinition],
        _system: &str,
    ) -> LlmResult<StreamBox> {
        let turn = self.next_turn()?;
        if let ScriptedTurn::Error(message) = turn {
            return Err(LlmError::ApiRequestFailed(message));
        }

        let mut events = Vec::new();
        match &turn {
            ScriptedTurn::Text(text) => events.push(StreamEvent::TextDelta(text.clone())),
            ScriptedTurn::ToolCalls(calls) => {
                for (id, name, arguments) in calls {
                    events.push(StreamEvent::ToolCallStart { id: id.clone(), name: name.clone() });
                    events.push(StreamEvent::ToolCallDelta {
                        id: id.clone(),
                        args_delta: arguments.to_string(),
                    });
                    events.push(StreamEvent::ToolCallEnd { id: id.clone() });
                }
            },
            ScriptedTurn::Error(_) => unreachable!(),
        }
        events.push(StreamEvent::Usage { input_tokens: 10, output_tokens: 10 });
        events.push(StreamEvent::Done);

        let boxed: StreamBox = Box::pin(stream::iter(events.into_iter().map(Ok)));
        Ok(boxed)
    }

    async fn complete(
        &self,
        _messages: &[Message],
        _tools: &[LlmToolDefinition],
        _system: &str,
    ) -> LlmResult<LlmResponse> {
        let turn = self.next_turn()?;
        if let ScriptedTurn::Error(message) = turn {
            return Err(LlmError::ApiRequestFailed(message));
        }
        Ok(Self::turn_to_response(turn))
    }

    fn max_context_length(&self) -> usize {
        128_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_queued_text_turn() {
        let provider = FakeLlmProvider::new().with_text("hello there");
        let response = provider.complete(&[], &[], "").await.unwrap();
        assert_eq!(response.message.text(), Some("hello there"));
        assert!(!response.has_tool_calls);
    }

    #[tokio::test]
    async fn replays_queued_tool_call_turn() {
        let provider =
            FakeLlmProvider::new().with_tool_call("call-1", "web_search", serde_json::json!({"q": "rust"}));
        let response = provider.complete(&[], &[], "").await.unwrap();
        assert!(response.has_tool_calls);
        let calls = response.message.tool_calls().unwrap();
        assert_eq!(calls[0].name, "web_search");
    }

    #[tokio::test]
    async fn exhausted_queue_is_a_provider_error() {
        let provider = FakeLlmProvider::new();
        let result = provider.complete(&[], &[], "").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn scripted_error_turn_surfaces_as_provider_error() {
        let provider = FakeLlmProvider::new().with_error("rate limited");
        let result = provider.complete(&[], &[], "").await;
        assert!(matches!(result, Err(LlmError::ApiRequestFailed(msg)) if msg == "rate limited"));
    }

    #[tokio::test]
    async fn calls_made_counts_each_invocation() {
        let provider = FakeLlmProvider::new().with_text("a").with_text("b");
        let _ = provider.complete(&[], &[], "").await;
        let _ = provider.complete(&[], &[], "").await;
        assert_eq!(provider.calls_made(), 2);
    }
}
