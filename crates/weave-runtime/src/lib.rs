//! The two-tier execution engine: Thinker/Actor/Observer, `L1FastTrack`,
//! `L3ReActEngine`, `ExecutionRouter`, and the meta-tools.
//!
//! A classified turn enters at [`ExecutionRouter::execute`], which dispatches
//! to either [`L1FastTrack`] (a bounded tool loop for routine requests) or
//! [`L3ReActEngine`] (a budgeted Think→Act→Observe loop with reasoning trace
//! and Todo injection), depending on the [`weave_core::Route`] the caller's
//! classifier already decided. Both tiers share one
//! [`weave_tools::ToolRegistry`], fronted by the fixed meta-tool set in
//! [`meta_tools`] that keeps the LLM-facing catalog O(1) in the number of
//! loaded Skills/SubAgents.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod actor;
mod error;
mod l1;
mod l3;
pub mod meta_tools;
mod observer;
mod router;
mod thinker;
mod todo_store;

pub use actor::{Actor, Observation};
pub use error::{RuntimeError, RuntimeResult};
pub use l1::{DEFAULT_MAX_STEPS, L1FastTrack};
pub use l3::{L3Config, L3ReActEngine};
pub use observer::{Observer, STOP_REASON_BUDGET, STOP_REASON_TIMEOUT};
pub use router::{ExecutionRouter, RouterConfig};
pub use thinker::{ThinkResult, Thinker};
pub use todo_store::{TODO_TTL_DAYS, TodoInjector, TodoStore};
