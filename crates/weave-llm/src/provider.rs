//! The `LlmProvider` abstraction: the engine's only window onto the model.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;

use crate::error::LlmResult;
use crate::types::{LlmResponse, LlmToolDefinition, Message, StreamEvent};

/// A boxed stream of [`StreamEvent`]s.
pub type StreamBox = Pin<Box<dyn Stream<Item = LlmResult<StreamEvent>> + Send>>;

/// Abstracts model invocation down to two operations, per the orchestration
/// engine's scope: `chat_complete` (here, [`LlmProvider::complete`]) and
/// `chat_stream` ([`LlmProvider::stream`]). Prompt assembly, retries, and
/// provider selection all live outside this crate.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Provider identifier, e.g. `"anthropic"`.
    fn name(&self) -> &str;

    /// Model identifier, e.g. `"claude-sonnet"`.
    fn model(&self) -> &str;

    /// Stream a chat completion, optionally tool-aware.
    async fn stream(
        &self,
        messages: &[Message],
        tools: &[LlmToolDefinition],
        system: &str,
    ) -> LlmResult<StreamBox>;

    /// Non-streaming chat completion, optionally tool-aware.
    async fn complete(
        &self,
        messages: &[Message],
        tools: &[LlmToolDefinition],
        system: &str,
    ) -> LlmResult<LlmResponse>;

    /// Convenience wrapper for a single-turn, tool-free completion.
    async fn complete_simple(&self, prompt: &str) -> LlmResult<String> {
        let messages = [Message::user(prompt)];
        let response = self.complete(&messages, &[], "").await?;
        Ok(response.message.text().unwrap_or_default().to_string())
    }

    /// Rough token-count estimate used for context-budget bookkeeping.
    /// Providers that can't measure exactly may fall back to this.
    fn count_tokens(&self, text: &str) -> usize {
        text.len() / 4
    }

    /// The provider's maximum context window, in tokens.
    fn max_context_length(&self) -> usize;
}

#[async_trait]
impl LlmProvider for Box<dyn LlmProvider> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn model(&self) -> &str {
        (**self).model()
    }

    async fn stream(
        &self,
        messages: &[Message],
        tools: &[LlmToolDefinition],
        system: &str,
    ) -> LlmResult<StreamBox> {
        (**self).stream(messages, tools, system).await
    }

    async fn complete(
        &self,
        messages: &[Message],
        tools: &[LlmToolDefinition],
        system: &str,
    ) -> LlmResult<LlmResponse> {
        (**self).complete(messages, tools, system).await
    }

    fn count_tokens(&self, text: &str) -> usize {
        (**self).count_tokens(text)
    }

    fn max_context_length(&self) -> usize {
        (**self).max_context_length()
    }
}
