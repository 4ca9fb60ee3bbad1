//! Wire types shared between the engine and the LLM abstraction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Who is speaking in a [`Message`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The system prompt. Always `messages[0]`.
    System,
    /// A user utterance.
    User,
    /// An assistant reply or tool-call request.
    Assistant,
    /// A tool execution result.
    Tool,
}

/// One piece of multi-part message content (used for image-capable
/// providers).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    /// Plain text.
    Text {
        /// Text content.
        text: String,
    },
    /// An inline image.
    Image {
        /// Base64-encoded image bytes.
        data: String,
        /// MIME type, e.g. `image/png`.
        media_type: String,
    },
}

/// The body of a [`Message`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text content.
    Text(String),
    /// An assistant turn requesting tool calls.
    ToolCalls(Vec<ToolCall>),
    /// A tool's result, referencing the originating call id.
    ToolResult(ToolCallResult),
    /// Multi-part content (text + images).
    MultiPart(Vec<ContentPart>),
}

/// A single chat message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who is speaking.
    pub role: MessageRole,
    /// What they said.
    pub content: MessageContent,
}

impl Message {
    /// Build a `system` message.
    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self { role: MessageRole::System, content: MessageContent::Text(text.into()) }
    }

    /// Build a `user` message.
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: MessageRole::User, content: MessageContent::Text(text.into()) }
    }

    /// Build an `assistant` message with plain text content.
    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: MessageRole::Assistant, content: MessageContent::Text(text.into()) }
    }

    /// Build an `assistant` message requesting tool calls.
    #[must_use]
    pub fn assistant_with_tools(tool_calls: Vec<ToolCall>) -> Self {
        Self { role: MessageRole::Assistant, content: MessageContent::ToolCalls(tool_calls) }
    }

    /// Build a `tool` message carrying a tool's result.
    #[must_use]
    pub fn tool_result(result: ToolCallResult) -> Self {
        Self { role: MessageRole::Tool, content: MessageContent::ToolResult(result) }
    }

    /// The plain text of this message, if it has any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            MessageContent::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The tool calls this message requests, if it is an
    /// assistant-with-tools message.
    #[must_use]
    pub fn tool_calls(&self) -> Option<&[ToolCall]> {
        match &self.content {
            MessageContent::ToolCalls(calls) => Some(calls),
            _ => None,
        }
    }
}

/// A tool invocation request emitted by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    /// Model-assigned call id, echoed back in the matching [`ToolCallResult`].
    pub id: String,
    /// Tool name. May be `"server:tool"` for namespaced (e.g. MCP) tools.
    pub name: String,
    /// Arguments, already parsed from the model's JSON.
    pub arguments: Value,
}

impl ToolCall {
    /// Build a tool call with empty arguments.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), arguments: Value::Object(Default::default()) }
    }

    /// Attach arguments.
    #[must_use]
    pub fn with_arguments(mut self, arguments: Value) -> Self {
        self.arguments = arguments;
        self
    }

    /// Split a namespaced tool name (`"server:tool"`) into its parts.
    #[must_use]
    pub fn parse_name(&self) -> Option<(&str, &str)> {
        self.name.split_once(':')
    }
}

/// The result of executing one [`ToolCall`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallResult {
    /// The originating call id.
    pub call_id: String,
    /// Canonical result text (already JSON-serialized by the caller).
    pub content: String,
    /// Whether this result represents a tool-level error.
    pub is_error: bool,
}

impl ToolCallResult {
    /// Build a success result.
    #[must_use]
    pub fn success(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { call_id: call_id.into(), content: content.into(), is_error: false }
    }

    /// Build an error result.
    #[must_use]
    pub fn error(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self { call_id: call_id.into(), content: content.into(), is_error: true }
    }
}

/// A tool's JSON-schema definition, as presented to the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmToolDefinition {
    /// Tool name.
    pub name: String,
    /// Human description shown to the model.
    pub description: Option<String>,
    /// JSON-schema for the tool's arguments.
    pub input_schema: Value,
}

impl LlmToolDefinition {
    /// Create a new tool definition with an empty object schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            input_schema: serde_json::json!({"type": "object"}),
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Set the input schema.
    #[must_use]
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.input_schema = schema;
        self
    }
}

/// A streamed event from [`crate::LlmProvider::stream`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StreamEvent {
    /// Partial reply text.
    TextDelta(String),
    /// A tool call started.
    ToolCallStart {
        /// Call id.
        id: String,
        /// Tool name.
        name: String,
    },
    /// Partial tool-call argument JSON.
    ToolCallDelta {
        /// Call id.
        id: String,
        /// Partial arguments JSON fragment.
        args_delta: String,
    },
    /// A tool call finished accumulating arguments.
    ToolCallEnd {
        /// Call id.
        id: String,
    },
    /// Chain-of-thought / reasoning delta, for providers that expose it.
    ReasoningDelta(String),
    /// Token usage, typically the final event before `Done`.
    Usage {
        /// Prompt tokens.
        input_tokens: usize,
        /// Completion tokens.
        output_tokens: usize,
    },
    /// The stream completed normally.
    Done,
    /// The stream failed.
    Error(String),
}

/// A non-streaming LLM response.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// The response message.
    pub message: Message,
    /// Whether the response requests tool calls.
    pub has_tool_calls: bool,
    /// Why the model stopped generating.
    pub stop_reason: StopReason,
    /// Token usage for this call.
    pub usage: Usage,
}

/// Why the model stopped generating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// Natural end of response.
    EndTurn,
    /// Hit the max-token limit.
    MaxTokens,
    /// Tool use requested.
    ToolUse,
    /// A stop sequence was hit.
    StopSequence,
}

/// Token usage for one LLM call.
#[derive(Debug, Clone, Default)]
pub struct Usage {
    /// Prompt tokens.
    pub input_tokens: usize,
    /// Completion tokens.
    pub output_tokens: usize,
}

impl Usage {
    /// Total tokens.
    #[must_use]
    pub fn total(&self) -> usize {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}
