//! Prelude module — commonly used types for convenient import.
//!
//! Use `use weave_test_support::prelude::*;` to import all essential types.

// LLM mock
pub use crate::{FakeLlmProvider, ScriptedTurn};

// Todo store mock
pub use crate::InMemoryTodoStore;

// Fixture builders
pub use crate::{
    test_session_id, test_skill_dir, test_subagent_dir, write_http_agent, write_local_react_agent,
    write_skill, write_skill_with_script,
};
