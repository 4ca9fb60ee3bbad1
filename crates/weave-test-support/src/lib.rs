//! Weave Test Support - shared test utilities for the weave orchestration
//! engine.
//!
//! This crate provides mock implementations and fixture builders that can
//! be used across multiple weave crates as a dev-dependency.
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! weave-test-support.workspace = true
//! ```
//!
//! Then use in your tests:
//!
//! ```rust,ignore
//! #[cfg(test)]
//! mod tests {
//!     use weave_test_support::{FakeLlmProvider, InMemoryTodoStore};
//!
//!     #[tokio::test]
//!     async fn fast_track_stops_at_a_plain_reply() {
//!         let llm = FakeLlmProvider::new().with_text("done");
//!         // ...wire `llm` into an `L1FastTrack` and run it.
//!     }
//! }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

pub mod fake_llm;
pub mod fixtures;
pub mod todo_store;

pub use fake_llm::{FakeLlmProvider, ScriptedTurn};
pub use fixtures::{
    test_session_id, test_skill_dir, test_subagent_dir, write_http_agent, write_local_react_agent,
    write_skill, write_skill_with_script,
};
pub use todo_store::InMemoryTodoStore;
