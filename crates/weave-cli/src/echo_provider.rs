//! A minimal stand-in [`weave_llm::LlmProvider`] for the demo binary.
//!
//! The orchestration core treats the model as an external collaborator (see
//! `weave-llm`'s crate docs) — wiring a real provider is left to the
//! embedding application. This one only echoes the latest user turn back as
//! a plain-text reply so `weave run` has something to stream end-to-end
//! without requiring API credentials.

use async_trait::async_trait;
use futures::stream;
use weave_llm::{
    LlmProvider, LlmResponse, LlmResult, LlmToolDefinition, Message, StopReason, StreamBox,
    StreamEvent, Usage,
};

/// Replies with a fixed acknowledgement of the user's last message. Never
/// requests tool calls, so both engine tiers terminate after one turn.
pub struct EchoProvider;

#[async_trait]
impl LlmProvider for EchoProvider {
    fn name(&self) -> &str {
        "echo"
    }

    fn model(&self) -> &str {
        "echo-1"
    }

    async fn stream(
        &self,
        messages: &[Message],
        _tools: &[LlmToolDefinition],
        _system: &str,
    ) -> LlmResult<StreamBox> {
        let reply = Self::reply_for(messages);
        let events = vec![
            Ok(StreamEvent::TextDelta(reply)),
            Ok(StreamEvent::Usage { input_tokens: 0, output_tokens: 0 }),
            Ok(StreamEvent::Done),
        ];
        Ok(Box::pin(stream::iter(events)))
    }

    async fn complete(
        &self,
        messages: &[Message],
        _tools: &[LlmToolDefinition],
        _system: &str,
    ) -> LlmResult<LlmResponse> {
        Ok(LlmResponse {
            message: Message::assistant(Self::reply_for(messages)),
            has_tool_calls: false,
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }

    fn max_context_length(&self) -> usize {
        8_192
    }
}

impl EchoProvider {
    fn reply_for(messages: &[Message]) -> String {
        let last_user = messages.iter().rev().find_map(|m| m.text());
        match last_user {
            Some(text) => format!("echo: {text}"),
            None => "echo: (no input)".to_string(),
        }
    }
}
