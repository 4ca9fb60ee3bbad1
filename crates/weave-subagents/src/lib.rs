//! SubAgent definition loading and the non-`local_react` backend seams.
//!
//! Like `weave-skills`, SubAgents are exposed to the LLM through a single
//! meta-tool (`subagent_call`, owned by `weave-runtime`, which also owns the
//! `local_react` backend since it needs the `L3ReActEngine` itself). This
//! crate owns definition loading plus the two backends that don't need the
//! engine: `local_code` (an in-process executor registry) and `http` (a
//! plain POST call).

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod code_executor;
mod definition;
mod error;
mod http_backend;
mod loader;
mod registry;

pub use code_executor::{CodeExecutorRegistry, SubAgentCodeExecutor};
pub use definition::{SubAgentBackend, SubAgentDefinition};
pub use error::{SubAgentError, SubAgentResult};
pub use http_backend::call_http_backend;
pub use loader::load_dirs;
pub use registry::SubAgentRegistry;
