//! `Thinker`: one LLM call, turned into a typed decision record.

use std::sync::Arc;

use weave_core::TokenUsage;
use weave_llm::{LlmProvider, LlmToolDefinition, Message, ToolCall};

use crate::error::RuntimeResult;

/// The outcome of one [`Thinker::think`] call.
#[derive(Debug, Clone, Default)]
pub struct ThinkResult {
    /// The model's stated reasoning / reply text for this step.
    pub thought: String,
    /// Requested tool calls, in model-emitted order. Empty iff `is_done`.
    pub tool_calls: Vec<ToolCall>,
    /// `true` exactly when `tool_calls` is empty — the step produced a
    /// final textual answer rather than further work requests.
    pub is_done: bool,
    /// Tokens spent on this call.
    pub tokens_used: TokenUsage,
}

/// Wraps an [`LlmProvider`] with the one decision this engine ever asks of
/// it: "given this conversation and this tool catalog, think."
pub struct Thinker {
    llm: Arc<dyn LlmProvider>,
}

impl Thinker {
    /// Build a thinker around a shared LLM provider.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Ask the model to think. `tools` absent (`None`) means the final
    /// step: the call goes out with no tool schemas at all, forcing a
    /// textual summary rather than another round of tool requests.
    pub async fn think(
        &self,
        messages: &[Message],
        tools: Option<&[LlmToolDefinition]>,
        system: &str,
    ) -> RuntimeResult<ThinkResult> {
        let empty = [];
        let tools = tools.unwrap_or(&empty);
        let response = self.llm.complete(messages, tools, system).await?;

        let tool_calls = response.message.tool_calls().map(<[ToolCall]>::to_vec).unwrap_or_default();
        let is_done = tool_calls.is_empty();
        let thought = response.message.text().unwrap_or_default().to_string();

        Ok(ThinkResult {
            thought,
            tool_calls,
            is_done,
            tokens_used: TokenUsage {
                input_tokens: response.usage.input_tokens,
                output_tokens: response.usage.output_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use weave_llm::{LlmResponse, LlmResult, StopReason, StreamBox, Usage};

    struct StubProvider {
        tool_calls: Vec<ToolCall>,
        text: String,
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }
        fn model(&self) -> &str {
            "stub-model"
        }
        async fn stream(
            &self,
            _messages: &[Message],
            _tools: &[LlmToolDefinition],
            _system: &str,
        ) -> LlmResult<StreamBox> {
            unimplemented!("not exercised by these tests")
        }
        async fn complete(
            &self,
            _messages: &[Message],
            _tools: &[LlmToolDefinition],
            _system: &str,
        ) -> LlmResult<LlmResponse> {
            let message = if self.tool_calls.is_empty() {
                Message::assistant(self.text.clone())
            } else {
                Message::assistant_with_tools(self.tool_calls.clone())
            };
            Ok(LlmResponse {
                message,
                has_tool_calls: !self.tool_calls.is_empty(),
                stop_reason: if self.tool_calls.is_empty() { StopReason::EndTurn } else { StopReason::ToolUse },
                usage: Usage { input_tokens: 10, output_tokens: 5 },
            })
        }
        fn max_context_length(&self) -> usize {
            100_000
        }
    }

    #[tokio::test]
    async fn no_tool_calls_means_done() {
        let thinker = Thinker::new(Arc::new(StubProvider { tool_calls: vec![], text: "4".to_string() }));
        let result = thinker.think(&[Message::user("2+2?")], Some(&[]), "sys").await.unwrap();
        assert!(result.is_done);
        assert_eq!(result.thought, "4");
    }

    #[tokio::test]
    async fn tool_calls_means_not_done() {
        let call = ToolCall::new("1", "web_search");
        let thinker = Thinker::new(Arc::new(StubProvider { tool_calls: vec![call], text: String::new() }));
        let result = thinker.think(&[Message::user("search X")], Some(&[]), "sys").await.unwrap();
        assert!(!result.is_done);
        assert_eq!(result.tool_calls.len(), 1);
    }

    #[tokio::test]
    async fn nil_tools_still_produces_a_result() {
        let thinker = Thinker::new(Arc::new(StubProvider { tool_calls: vec![], text: "final".to_string() }));
        let result = thinker.think(&[Message::user("wrap up")], None, "sys").await.unwrap();
        assert!(result.is_done);
        assert_eq!(result.thought, "final");
    }
}
