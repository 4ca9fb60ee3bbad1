//! `ToolRegistry`: the name → `Tool` catalog and its time-bounded dispatcher.

use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use serde_json::Value;
use weave_llm::LlmToolDefinition;

use crate::context::ToolContext;
use crate::error::ToolError;
use crate::tier::Tier;
use crate::{Tool, canonical_json};

/// Holds a name → [`Tool`] mapping and dispatches calls with a fail-safe
/// timeout. Registries are built once at startup and are read-only
/// afterward, so concurrent reads need no locking.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { tools: HashMap::new() }
    }

    /// Register a tool. Panics if the name is already registered — a
    /// startup-time programmer error, not a runtime condition.
    ///
    /// # Panics
    ///
    /// Panics if a tool with the same name is already registered.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        let previous = self.tools.insert(name.clone(), tool);
        assert!(previous.is_none(), "duplicate tool registration: {name}");
    }

    /// Look up a tool by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Whether a tool is registered under this name.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    /// All names currently registered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(String::as_str)
    }

    /// JSON-schema definitions for every tool visible at the given tier.
    #[must_use]
    pub fn schemas_for(&self, tier: Tier) -> Vec<LlmToolDefinition> {
        self.tools
            .values()
            .filter(|tool| tool.tiers().contains(tier))
            .map(|tool| {
                LlmToolDefinition::new(tool.name())
                    .with_description(tool.description())
                    .with_schema(tool.input_schema())
            })
            .collect()
    }

    /// Execute a tool by name, returning the canonical JSON result string.
    ///
    /// Timeout nesting contract: `tool.timeout_ms()` is a fail-safe here,
    /// not a precision bound — a well-behaved tool enforces its own,
    /// strictly smaller, internal I/O timeout and this one should never
    /// actually fire in practice.
    pub async fn execute(&self, name: &str, args: Value, ctx: &ToolContext) -> String {
        let Some(tool) = self.get(name) else {
            return canonical_json(&Err(ToolError::UnknownTool(name.to_string())));
        };

        let timeout_ms = tool.timeout_ms();
        let call = AssertUnwindSafe(tool.execute(args, ctx)).catch_unwind();

        let outcome = match tokio::time::timeout(Duration::from_millis(timeout_ms), call).await {
            Ok(Ok(exec_result)) => exec_result,
            Ok(Err(panic_payload)) => Err(ToolError::ExecutionFailed(panic_message(&panic_payload))),
            Err(_elapsed) => Err(ToolError::Timeout(timeout_ms)),
        };

        canonical_json(&outcome)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "tool panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;

    use crate::error::ToolExecResult;
    use crate::tier::TierSet;

    struct EchoTool;

    #[async_trait]
    impl Tool for EchoTool {
        fn name(&self) -> &str {
            "echo"
        }
        fn description(&self) -> &str {
            "echoes its input"
        }
        fn input_schema(&self) -> Value {
            serde_json::json!({"type": "object"})
        }
        fn tiers(&self) -> TierSet {
            TierSet::BOTH
        }
        async fn execute(&self, args: Value, _ctx: &ToolContext) -> ToolExecResult {
            Ok(args)
        }
    }

    struct SlowTool;

    #[async_trait]
    impl Tool for SlowTool {
        fn name(&self) -> &str {
            "slow"
        }
        fn description(&self) -> &str {
            "never finishes in time"
        }
        fn input_schema(&self) -> Value {
            serde_json::json!({"type": "object"})
        }
        fn tiers(&self) -> TierSet {
            TierSet::L3_ONLY
        }
        fn timeout_ms(&self) -> u64 {
            10
        }
        async fn execute(&self, _args: Value, _ctx: &ToolContext) -> ToolExecResult {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Value::Null)
        }
    }

    struct PanickingTool;

    #[async_trait]
    impl Tool for PanickingTool {
        fn name(&self) -> &str {
            "panics"
        }
        fn description(&self) -> &str {
            "always panics"
        }
        fn input_schema(&self) -> Value {
            serde_json::json!({"type": "object"})
        }
        fn tiers(&self) -> TierSet {
            TierSet::L3_ONLY
        }
        async fn execute(&self, _args: Value, _ctx: &ToolContext) -> ToolExecResult {
            panic!("boom");
        }
    }

    fn ctx() -> ToolContext {
        ToolContext::new(PathBuf::from("/tmp"))
    }

    #[tokio::test]
    async fn unknown_tool_returns_structured_error() {
        let registry = ToolRegistry::new();
        let json = registry.execute("ghost", Value::Null, &ctx()).await;
        assert!(json.contains(r#""status":"error""#));
        assert!(json.contains("unknown tool: ghost"));
    }

    #[tokio::test]
    async fn known_tool_executes_and_wraps_success() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        let json = registry.execute("echo", serde_json::json!({"x": 1}), &ctx()).await;
        assert!(json.contains(r#""status":"success""#));
        assert!(json.contains(r#""x":1"#));
    }

    #[tokio::test]
    async fn registry_timeout_is_a_fail_safe() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(SlowTool));
        let json = registry.execute("slow", Value::Null, &ctx()).await;
        assert!(json.contains("timeout (10ms)"));
    }

    #[tokio::test]
    async fn tool_panic_becomes_execution_exception_error() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(PanickingTool));
        let json = registry.execute("panics", Value::Null, &ctx()).await;
        assert!(json.contains("execution exception"));
    }

    #[tokio::test]
    async fn schemas_for_filters_by_tier() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(EchoTool));
        registry.register(Arc::new(SlowTool));

        let l1_schemas = registry.schemas_for(Tier::L1);
        assert_eq!(l1_schemas.len(), 1);
        assert_eq!(l1_schemas[0].name, "echo");
    }
}
