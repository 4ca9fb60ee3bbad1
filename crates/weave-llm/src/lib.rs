//! LLM client abstraction.
//!
//! This crate is deliberately thin: per the orchestration engine's scope,
//! the model itself — invocation, streaming decode, retries, provider
//! selection — is an external collaborator. The core only needs two
//! operations, [`LlmProvider::complete`] and [`LlmProvider::stream`], plus
//! the wire types ([`Message`], [`ToolCall`], [`StreamEvent`]) that flow
//! across that boundary.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod error;
mod provider;
mod types;

pub use error::{LlmError, LlmResult};
pub use provider::{LlmProvider, StreamBox};
pub use types::{
    ContentPart, LlmResponse, LlmToolDefinition, Message, MessageContent, MessageRole,
    StopReason, StreamEvent, ToolCall, ToolCallResult, Usage,
};
