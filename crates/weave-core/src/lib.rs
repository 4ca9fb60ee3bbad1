//! Shared data model and ambient execution context for the weave orchestration engine.
//!
//! This crate has no knowledge of LLMs, tools, skills, or sub-agents — it
//! only defines the plain data that flows between those subsystems
//! (`IntentResult`, `TodoItem`, `ReasoningTrace`, `ExecutionResult`) plus the
//! `AmbientContext` scoped-variable mechanism that every other crate in the
//! workspace relies on to propagate `session_id` / `agent_depth` across async
//! boundaries without explicit parameter threading.
//!
//! # Example
//!
//! ```rust
//! use weave_core::AmbientContext;
//!
//! # #[tokio::main]
//! # async fn main() {
//! AmbientContext::root_scope("session-1", async {
//!     assert_eq!(AmbientContext::agent_depth(), 0);
//!     let token = AmbientContext::set_agent_depth(1);
//!     assert_eq!(AmbientContext::agent_depth(), 1);
//!     AmbientContext::reset_agent_depth(token);
//!     assert_eq!(AmbientContext::agent_depth(), 0);
//! })
//! .await;
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod ambient;
mod intent;
mod result;
mod todo;
mod trace;

pub use ambient::{AgentDepthToken, AmbientContext, SessionIdToken};
pub use intent::{ChatMessage, ChatRole, IntentResult, Route};
pub use result::{ExecutionResult, ExecutionSource, ToolCallSummary};
pub use todo::{TodoItem, TodoPriority, TodoStatus};
pub use trace::{ReasoningStep, ReasoningTrace, TokenUsage};
