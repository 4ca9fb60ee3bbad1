//! The Todo three-layer self-management mechanism: a per-session store
//! plus the idempotent system-message injection/strip cycle.

use async_trait::async_trait;
use weave_core::TodoItem;

use crate::error::RuntimeResult;

/// Default TTL for a session's Todo list in the backing cache.
pub const TODO_TTL_DAYS: u64 = 7;

/// The per-session CRUD surface the engine needs from whatever cache backs
/// the Todo list. Keyed by `todo:<session_id>` in a real deployment; this
/// crate only assumes the two async operations below.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Current snapshot for a session, empty if none has been written yet.
    async fn get(&self, session_id: &str) -> RuntimeResult<Vec<TodoItem>>;

    /// Overwrite a session's list. Per §5's shared-state note, this is a
    /// plain last-write-wins overwrite — concurrent writers to the same
    /// session are not coordinated by the core, only serialized by the
    /// backing cache's atomic set. In practice only one LLM turn writes to
    /// a session at a time, so this is a documented, accepted race rather
    /// than one engineered away.
    async fn set(&self, session_id: &str, items: Vec<TodoItem>) -> RuntimeResult<()>;
}

const MARKER_START: &str = "<!-- todo-injector:start -->";
const MARKER_END: &str = "<!-- todo-injector:end -->";

/// Rewrites a system message's content to carry (or not carry) the current
/// Todo snapshot, identified by a fixed delimiter pair so the strip step is
/// a plain substring operation rather than a parser.
///
/// Never appends a new message — only ever rewrites `messages[0].content`
/// — so re-running injection never produces consecutive same-role turns on
/// strict LLM providers.
pub struct TodoInjector;

impl TodoInjector {
    /// Strip any previously injected block, then, if any item is active
    /// (pending or in_progress), append a fresh block containing the full
    /// JSON snapshot. A session with no active items yields the stripped
    /// text unchanged (no block at all).
    #[must_use]
    pub fn inject(system_content: &str, todos: &[TodoItem]) -> String {
        let stripped = Self::strip(system_content);

        if todos.iter().any(TodoItem::is_active) {
            let snapshot = serde_json::to_string(todos).unwrap_or_else(|_| "[]".to_string());
            format!("{stripped}\n\n{MARKER_START}\n{snapshot}\n{MARKER_END}")
        } else {
            stripped
        }
    }

    /// Remove a previously injected block, if present, leaving everything
    /// else in `system_content` untouched.
    #[must_use]
    pub fn strip(system_content: &str) -> String {
        let Some(start) = system_content.find(MARKER_START) else {
            return system_content.to_string();
        };
        let Some(end_rel) = system_content[start..].find(MARKER_END) else {
            return system_content.to_string();
        };
        let end = start + end_rel + MARKER_END.len();
        let mut result = system_content[..start].to_string();
        result.push_str(&system_content[end..]);
        result.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_core::{TodoPriority, TodoStatus};

    fn item(id: &str, status: TodoStatus) -> TodoItem {
        TodoItem { id: id.to_string(), content: "work".to_string(), status, priority: TodoPriority::Medium }
    }

    #[test]
    fn no_active_items_yields_no_block() {
        let result = TodoInjector::inject("You are an assistant.", &[item("1", TodoStatus::Completed)]);
        assert!(!result.contains(MARKER_START));
        assert_eq!(result, "You are an assistant.");
    }

    #[test]
    fn active_item_appends_a_block() {
        let result = TodoInjector::inject("You are an assistant.", &[item("1", TodoStatus::Pending)]);
        assert!(result.contains(MARKER_START));
        assert!(result.contains(MARKER_END));
        assert!(result.contains("\"id\":\"1\""));
    }

    #[test]
    fn injection_is_idempotent() {
        let todos = vec![item("1", TodoStatus::InProgress)];
        let once = TodoInjector::inject("System prompt.", &todos);
        let twice = TodoInjector::inject(&once, &todos);
        assert_eq!(once, twice);
    }

    #[test]
    fn re_injection_replaces_stale_block_rather_than_duplicating() {
        let stale = TodoInjector::inject("System prompt.", &[item("1", TodoStatus::Pending)]);
        let fresh = TodoInjector::inject(&stale, &[item("1", TodoStatus::Completed)]);
        assert!(!fresh.contains(MARKER_START));
        assert_eq!(fresh, "System prompt.");
    }

    #[test]
    fn strip_is_a_no_op_on_text_with_no_block() {
        assert_eq!(TodoInjector::strip("plain text"), "plain text");
    }
}
