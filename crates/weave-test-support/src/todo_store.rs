//! An in-memory [`weave_runtime::TodoStore`] for exercising the Todo
//! lifecycle without a real cache backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use weave_core::TodoItem;
use weave_runtime::{RuntimeResult, TodoStore};

/// Per-session Todo snapshots held in a `Mutex<HashMap<..>>`. Matches the
/// real store's last-write-wins `set` semantics exactly — there is no
/// additional coordination here either.
#[derive(Debug, Default)]
pub struct InMemoryTodoStore {
    sessions: Mutex<HashMap<String, Vec<TodoItem>>>,
}

impl InMemoryTodoStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a session's list before the engine runs, for tests that start
    /// mid-list rather than from empty.
    #[must_use]
    pub fn with_seed(self, session_id: impl Into<String>, items: Vec<TodoItem>) -> Self {
        if let Ok(mut guard) = self.sessions.lock() {
            guard.insert(session_id.into(), items);
        }
        self
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn get(&self, session_id: &str) -> RuntimeResult<Vec<TodoItem>> {
        Ok(self
            .sessions
            .lock()
            .ok()
            .and_then(|g| g.get(session_id).cloned())
            .unwrap_or_default())
    }

    async fn set(&self, session_id: &str, items: Vec<TodoItem>) -> RuntimeResult<()> {
        if let Ok(mut guard) = self.sessions.lock() {
            guard.insert(session_id.to_string(), items);
        }
        Ok(())
    }
}
