//! `TodoItem`: the unit the Todo three-layer self-management mechanism
//! reads and writes.

use serde::{Deserialize, Deserializer, Serialize};

/// Lifecycle state of a [`TodoItem`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    /// Not yet started.
    Pending,
    /// Currently being worked.
    InProgress,
    /// Finished.
    Completed,
    /// Abandoned.
    Cancelled,
}

impl Default for TodoStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Priority hint. Purely informational — the core does not schedule by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoPriority {
    /// Highest priority.
    High,
    /// Default priority.
    Medium,
    /// Lowest priority.
    Low,
}

impl Default for TodoPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// One entry in a session's Todo list.
///
/// The invariant "at most one `in_progress` at a time" is a prompt-level
/// convention, not enforced here: `TodoStore::set` records whatever the LLM
/// writes, even if it violates the convention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Stable identifier. Always string-coerced on write, even if the LLM
    /// supplied a number.
    #[serde(deserialize_with = "coerce_id_to_string")]
    pub id: String,
    /// Human-readable description of the work item.
    pub content: String,
    /// Current lifecycle state.
    #[serde(default)]
    pub status: TodoStatus,
    /// Scheduling hint.
    #[serde(default)]
    pub priority: TodoPriority,
}

impl TodoItem {
    /// Build a new pending, medium-priority item.
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            status: TodoStatus::default(),
            priority: TodoPriority::default(),
        }
    }

    /// True for `pending` and `in_progress` — the states that make a Todo
    /// list "active" and thus worth re-injecting into the system message.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self.status, TodoStatus::Pending | TodoStatus::InProgress)
    }
}

/// Accepts the `id` field as a string, number, or bool and coerces it to a
/// `String` — the LLM sometimes emits a bare integer where a string is
/// expected.
fn coerce_id_to_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(serde::de::Error::custom(format!("cannot coerce {other} to a Todo id string"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_is_pending_and_active() {
        let item = TodoItem::new("1", "write tests");
        assert_eq!(item.status, TodoStatus::Pending);
        assert!(item.is_active());
    }

    #[test]
    fn completed_item_is_not_active() {
        let mut item = TodoItem::new("1", "write tests");
        item.status = TodoStatus::Completed;
        assert!(!item.is_active());
    }

    #[test]
    fn missing_status_and_priority_deserialize_to_defaults() {
        let item: TodoItem = serde_json::from_str(r#"{"id":"1","content":"x"}"#).unwrap();
        assert_eq!(item.status, TodoStatus::Pending);
        assert_eq!(item.priority, TodoPriority::Medium);
    }

    #[test]
    fn numeric_id_is_coerced_to_a_string() {
        let item: TodoItem = serde_json::from_str(r#"{"id":1,"content":"x"}"#).unwrap();
        assert_eq!(item.id, "1");
    }

    #[test]
    fn list_of_items_with_mixed_id_types_deserializes() {
        let items: Vec<TodoItem> =
            serde_json::from_str(r#"[{"id":1,"content":"a"},{"id":"2","content":"b"}]"#).unwrap();
        assert_eq!(items[0].id, "1");
        assert_eq!(items[1].id, "2");
    }
}
