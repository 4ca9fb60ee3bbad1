//! The `local_code` backend: an in-process registry of named executors.
//!
//! The original implementation dynamically imports a Python class by dotted
//! path at call time. There is no equivalent to dynamic code loading in
//! Rust; the idiomatic rendition is for the embedding application to
//! register a concrete [`SubAgentCodeExecutor`] implementation under the
//! same `entry` key ahead of time, and for `subagent_call` to look it up
//! instead of importing anything.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

/// An in-process task executor reachable from a `local_code` SubAgent
/// definition's `entry` field.
#[async_trait]
pub trait SubAgentCodeExecutor: Send + Sync {
    /// Run the task, returning its textual report or a descriptive error.
    async fn execute(&self, task: &str) -> Result<String, String>;
}

/// Maps a `local_code` agent's `entry` string to its registered executor.
#[derive(Clone, Default)]
pub struct CodeExecutorRegistry {
    executors: HashMap<String, Arc<dyn SubAgentCodeExecutor>>,
}

impl CodeExecutorRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an executor under `entry`.
    pub fn register(&mut self, entry: impl Into<String>, executor: Arc<dyn SubAgentCodeExecutor>) {
        self.executors.insert(entry.into(), executor);
    }

    /// Look up an executor by entry key.
    #[must_use]
    pub fn get(&self, entry: &str) -> Option<Arc<dyn SubAgentCodeExecutor>> {
        self.executors.get(entry).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;

    #[async_trait]
    impl SubAgentCodeExecutor for Echo {
        async fn execute(&self, task: &str) -> Result<String, String> {
            Ok(format!("echo: {task}"))
        }
    }

    #[tokio::test]
    async fn registered_executor_is_reachable_by_entry() {
        let mut registry = CodeExecutorRegistry::new();
        registry.register("echo_agent", Arc::new(Echo));

        let executor = registry.get("echo_agent").unwrap();
        assert_eq!(executor.execute("hi").await.unwrap(), "echo: hi");
        assert!(registry.get("missing").is_none());
    }
}
