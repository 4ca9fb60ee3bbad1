//! `todo_write` / `todo_read`: the two meta-tools backing the Todo
//! three-layer self-management mechanism's in-conversation surface.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use weave_core::{AmbientContext, TodoItem, TodoStatus};
use weave_tools::{RiskLevel, TierSet, Tool, ToolContext, ToolError, ToolExecResult};

use crate::todo_store::TodoStore;

/// `"<n> in-progress"`, per §4.11 — the one-line title carried alongside
/// the full snapshot so the model doesn't have to count items itself.
fn in_progress_title(items: &[TodoItem]) -> String {
    let count = items.iter().filter(|item| item.status == TodoStatus::InProgress).count();
    format!("{count} in-progress")
}

/// A fuller counts breakdown for `todo_read`'s summary: in-progress,
/// pending, and completed counts alongside the title.
fn counts_summary(items: &[TodoItem]) -> serde_json::Value {
    let mut in_progress = 0usize;
    let mut pending = 0usize;
    let mut completed = 0usize;
    let mut cancelled = 0usize;
    for item in items {
        match item.status {
            TodoStatus::InProgress => in_progress += 1,
            TodoStatus::Pending => pending += 1,
            TodoStatus::Completed => completed += 1,
            TodoStatus::Cancelled => cancelled += 1,
        }
    }
    serde_json::json!({
        "in_progress": in_progress,
        "pending": pending,
        "completed": completed,
        "cancelled": cancelled,
    })
}

/// Overwrites the session's Todo list. A no-op (returns an empty list) when
/// the ambient `session_id` is empty — inside a sub-agent subtree, per
/// [`AmbientContext`]'s documented guard.
pub struct TodoWriteTool {
    store: Arc<dyn TodoStore>,
}

impl TodoWriteTool {
    /// Build the tool around a shared Todo backing store.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for TodoWriteTool {
    fn name(&self) -> &str {
        "todo_write"
    }

    fn description(&self) -> &str {
        "Replace the current session's Todo list with the given items. \
         Call this whenever the plan changes: a new item is discovered, one \
         is started, or one is finished."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "items": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": {"type": "string"},
                            "content": {"type": "string"},
                            "status": {"type": "string", "enum": ["pending", "in_progress", "completed", "cancelled"]},
                            "priority": {"type": "string", "enum": ["high", "medium", "low"]}
                        },
                        "required": ["id", "content"]
                    }
                }
            },
            "required": ["items"]
        })
    }

    fn tiers(&self) -> TierSet {
        TierSet::L3_ONLY
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Write
    }

    async fn execute(&self, args: Value, _ctx: &ToolContext) -> ToolExecResult {
        let session_id = AmbientContext::session_id();
        if session_id.is_empty() {
            return Ok(serde_json::json!({"items": [], "note": "no active session; list not persisted"}));
        }

        let raw_items = args.get("items").cloned().unwrap_or(Value::Array(Vec::new()));
        let items: Vec<TodoItem> =
            serde_json::from_value(raw_items).map_err(|e| ToolError::InvalidArguments(e.to_string()))?;

        self.store
            .set(&session_id, items.clone())
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;

        let title = in_progress_title(&items);
        let snapshot = serde_json::to_value(&items).unwrap_or_else(|_| serde_json::json!([]));
        Ok(serde_json::json!({"items": items, "snapshot": snapshot, "title": title}))
    }
}

/// Reads back the session's current Todo list, for the model to check its
/// own progress.
pub struct TodoReadTool {
    store: Arc<dyn TodoStore>,
}

impl TodoReadTool {
    /// Build the tool around a shared Todo backing store.
    #[must_use]
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Tool for TodoReadTool {
    fn name(&self) -> &str {
        "todo_read"
    }

    fn description(&self) -> &str {
        "Read back the current session's Todo list."
    }

    fn input_schema(&self) -> Value {
        serde_json::json!({"type": "object", "properties": {}})
    }

    fn tiers(&self) -> TierSet {
        TierSet::L3_ONLY
    }

    async fn execute(&self, _args: Value, _ctx: &ToolContext) -> ToolExecResult {
        let session_id = AmbientContext::session_id();
        if session_id.is_empty() {
            return Ok(serde_json::json!({"items": []}));
        }

        let items = self.store.get(&session_id).await.map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        let title = in_progress_title(&items);
        let counts = counts_summary(&items);
        Ok(serde_json::json!({"items": items, "title": title, "counts": counts}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use weave_core::TodoStatus;

    struct InMemoryTodoStore(Mutex<HashMap<String, Vec<TodoItem>>>);

    impl InMemoryTodoStore {
        fn empty() -> Self {
            Self(Mutex::new(HashMap::new()))
        }
    }

    #[async_trait]
    impl TodoStore for InMemoryTodoStore {
        async fn get(&self, session_id: &str) -> crate::error::RuntimeResult<Vec<TodoItem>> {
            Ok(self.0.lock().unwrap().get(session_id).cloned().unwrap_or_default())
        }
        async fn set(&self, session_id: &str, items: Vec<TodoItem>) -> crate::error::RuntimeResult<()> {
            self.0.lock().unwrap().insert(session_id.to_string(), items);
            Ok(())
        }
    }

    fn ctx() -> ToolContext {
        ToolContext::new(PathBuf::from("/tmp"))
    }

    #[tokio::test]
    async fn write_then_read_round_trips_within_a_session() {
        let store: Arc<dyn TodoStore> = Arc::new(InMemoryTodoStore::empty());
        let write = TodoWriteTool::new(Arc::clone(&store));
        let read = TodoReadTool::new(store);

        AmbientContext::root_scope("s1", async {
            let args = serde_json::json!({"items": [{"id": "1", "content": "write tests"}]});
            write.execute(args, &ctx()).await.unwrap();

            let result = read.execute(Value::Null, &ctx()).await.unwrap();
            assert_eq!(result["items"][0]["id"], "1");
            assert_eq!(result["items"][0]["status"], "pending");
        })
        .await;
    }

    #[tokio::test]
    async fn write_returns_an_in_progress_title_and_snapshot() {
        let store: Arc<dyn TodoStore> = Arc::new(InMemoryTodoStore::empty());
        let write = TodoWriteTool::new(store);

        AmbientContext::root_scope("s1", async {
            let args = serde_json::json!({"items": [
                {"id": "1", "content": "a", "status": "in_progress"},
                {"id": "2", "content": "b", "status": "pending"},
            ]});
            let result = write.execute(args, &ctx()).await.unwrap();
            assert_eq!(result["title"], "1 in-progress");
            assert_eq!(result["snapshot"][0]["id"], "1");
        })
        .await;
    }

    #[tokio::test]
    async fn read_returns_a_counts_summary() {
        let store: Arc<dyn TodoStore> = Arc::new(InMemoryTodoStore::empty());
        let write = TodoWriteTool::new(Arc::clone(&store));
        let read = TodoReadTool::new(store);

        AmbientContext::root_scope("s1", async {
            let args = serde_json::json!({"items": [
                {"id": "1", "content": "a", "status": "in_progress"},
                {"id": "2", "content": "b", "status": "completed"},
                {"id": "3", "content": "c", "status": "pending"},
            ]});
            write.execute(args, &ctx()).await.unwrap();

            let result = read.execute(Value::Null, &ctx()).await.unwrap();
            assert_eq!(result["title"], "1 in-progress");
            assert_eq!(result["counts"]["in_progress"], 1);
            assert_eq!(result["counts"]["pending"], 1);
            assert_eq!(result["counts"]["completed"], 1);
        })
        .await;
    }

    #[tokio::test]
    async fn write_without_a_session_does_not_persist() {
        let store: Arc<dyn TodoStore> = Arc::new(InMemoryTodoStore::empty());
        let write = TodoWriteTool::new(Arc::clone(&store));

        AmbientContext::root_scope("", async {
            let args = serde_json::json!({"items": [{"id": "1", "content": "x"}]});
            let result = write.execute(args, &ctx()).await.unwrap();
            assert_eq!(result["items"], serde_json::json!([]));
        })
        .await;
    }

    #[tokio::test]
    async fn read_with_no_prior_write_returns_empty_list() {
        let store: Arc<dyn TodoStore> = Arc::new(InMemoryTodoStore::empty());
        let read = TodoReadTool::new(store);

        AmbientContext::root_scope("s2", async {
            let result = read.execute(Value::Null, &ctx()).await.unwrap();
            assert_eq!(result["items"], serde_json::json!([]));
        })
        .await;
    }

    #[tokio::test]
    async fn invalid_item_shape_is_an_invalid_arguments_error() {
        let store: Arc<dyn TodoStore> = Arc::new(InMemoryTodoStore::empty());
        let write = TodoWriteTool::new(store);

        AmbientContext::root_scope("s3", async {
            let args = serde_json::json!({"items": [{"content_missing_id": true}]});
            let err = write.execute(args, &ctx()).await.unwrap_err();
            assert!(matches!(err, ToolError::InvalidArguments(_)));
        })
        .await;
    }

    #[test]
    fn status_default_matches_pending() {
        let item = TodoItem::new("x", "y");
        assert_eq!(item.status, TodoStatus::Pending);
    }
}
