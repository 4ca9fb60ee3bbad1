//! `RestrictedToolView`: a physical allow-list overlay over a parent
//! registry, used to scope a sub-agent's tool access.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::Value;
use weave_llm::LlmToolDefinition;

use crate::context::ToolContext;
use crate::error::ToolError;
use crate::registry::ToolRegistry;
use crate::canonical_json;
use crate::tier::Tier;

/// A view over a parent [`ToolRegistry`] that only exposes an allow-listed
/// subset of its tools.
///
/// This is a *physical* overlay, not a schema filter: even if the
/// underlying LLM guesses a tool name that exists in the parent registry
/// but is outside the allow-list, [`RestrictedToolView::execute`] rejects it
/// without ever delegating to the parent.
pub struct RestrictedToolView {
    parent: Arc<ToolRegistry>,
    allowed: HashSet<String>,
}

impl RestrictedToolView {
    /// Build a view over `parent` restricted to `allow_list`.
    ///
    /// Names in `allow_list` that the parent registry does not actually
    /// have are dropped silently, with a `tracing::warn!` naming the
    /// offending tool and (if given) the agent it was configured for.
    #[must_use]
    pub fn new(parent: Arc<ToolRegistry>, allow_list: &[String], agent_name: &str) -> Self {
        let mut allowed = HashSet::with_capacity(allow_list.len());
        for name in allow_list {
            if parent.contains(name) {
                allowed.insert(name.clone());
            } else {
                tracing::warn!(
                    tool = %name,
                    agent = %agent_name,
                    "dropping unknown tool name from sub-agent allow-list"
                );
            }
        }
        Self { parent, allowed }
    }

    /// Build a view exposing the parent registry's full tool set — the
    /// `tool_filter = nil` case from `subagent_call`.
    #[must_use]
    pub fn unrestricted(parent: Arc<ToolRegistry>) -> Self {
        let allowed = parent.names().map(str::to_string).collect();
        Self { parent, allowed }
    }

    /// Whether `name` is on the allow-list.
    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        self.allowed.contains(name)
    }

    /// Schemas for allow-listed tools visible at the given tier.
    #[must_use]
    pub fn schemas_for(&self, tier: Tier) -> Vec<LlmToolDefinition> {
        self.parent
            .schemas_for(tier)
            .into_iter()
            .filter(|def| self.allowed.contains(&def.name))
            .collect()
    }

    /// Execute a tool, rejecting anything outside the allow-list before it
    /// ever reaches the parent registry.
    pub async fn execute(&self, name: &str, args: Value, ctx: &ToolContext) -> String {
        if !self.allows(name) {
            return canonical_json(&Err(ToolError::PermissionDenied));
        }
        self.parent.execute(name, args, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolExecResult;
    use crate::tier::TierSet;
    use crate::Tool;
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct NamedTool(&'static str);

    #[async_trait]
    impl Tool for NamedTool {
        fn name(&self) -> &str {
            self.0
        }
        fn description(&self) -> &str {
            "test tool"
        }
        fn input_schema(&self) -> Value {
            serde_json::json!({"type": "object"})
        }
        fn tiers(&self) -> TierSet {
            TierSet::BOTH
        }
        async fn execute(&self, _args: Value, _ctx: &ToolContext) -> ToolExecResult {
            Ok(Value::Null)
        }
    }

    fn ctx() -> ToolContext {
        ToolContext::new(PathBuf::from("/tmp"))
    }

    #[tokio::test]
    async fn rejects_off_allowlist_name_even_if_parent_has_it() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("web_search")));
        registry.register(Arc::new(NamedTool("danger_tool")));
        let registry = Arc::new(registry);

        let view = RestrictedToolView::new(registry, &["web_search".to_string()], "researcher");

        let json = view.execute("danger_tool", Value::Null, &ctx()).await;
        assert!(json.contains("PermissionError"));
    }

    #[tokio::test]
    async fn allows_listed_name_to_delegate_to_parent() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("web_search")));
        let registry = Arc::new(registry);

        let view = RestrictedToolView::new(registry, &["web_search".to_string()], "researcher");

        let json = view.execute("web_search", Value::Null, &ctx()).await;
        assert!(json.contains(r#""status":"success""#));
    }

    #[tokio::test]
    async fn unknown_allowlist_entries_are_dropped_not_fatal() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("web_search")));
        let registry = Arc::new(registry);

        let view = RestrictedToolView::new(
            registry,
            &["web_search".to_string(), "nonexistent_tool".to_string()],
            "researcher",
        );

        assert!(view.allows("web_search"));
        assert!(!view.allows("nonexistent_tool"));
    }

    #[tokio::test]
    async fn unrestricted_view_exposes_everything() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(NamedTool("a")));
        registry.register(Arc::new(NamedTool("b")));
        let registry = Arc::new(registry);

        let view = RestrictedToolView::unrestricted(registry);
        assert!(view.allows("a"));
        assert!(view.allows("b"));
    }
}
