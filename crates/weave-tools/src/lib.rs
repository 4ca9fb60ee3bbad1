//! Typed tool catalog.
//!
//! A [`Tool`] is registered once in a [`ToolRegistry`] and carries both its
//! LLM-facing schema and its own execution timeout. The registry is the only
//! thing that executes tools directly; a [`RestrictedToolView`] wraps a
//! registry with an allow-list for sub-agents, rejecting off-catalog guesses
//! before they ever reach the parent.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod context;
mod error;
mod registry;
mod restricted;
mod tier;

pub use context::ToolContext;
pub use error::{ToolError, ToolExecResult};
pub use registry::ToolRegistry;
pub use restricted::RestrictedToolView;
pub use tier::{RiskLevel, Tier, TierSet};

use async_trait::async_trait;
use serde_json::Value;
use weave_llm::LlmToolDefinition;

/// Maximum length of a tool's canonical success payload before it is
/// truncated for LLM consumption.
pub const MAX_OUTPUT_CHARS: usize = 30_000;

/// A typed, schema-bearing, time-bounded unit of work the engine can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Human description shown to the model.
    fn description(&self) -> &str;

    /// JSON-schema for this tool's arguments.
    fn input_schema(&self) -> Value;

    /// Which execution tiers this tool is visible in.
    fn tiers(&self) -> TierSet;

    /// Execution timeout. The registry enforces this as a fail-safe; any
    /// internal I/O timeout the tool performs itself must be strictly
    /// smaller (see the timeout nesting contract in
    /// [`ToolRegistry::execute`]).
    fn timeout_ms(&self) -> u64 {
        30_000
    }

    /// Risk classification, informational for now (surfaced for an
    /// eventual approval layer, which is out of scope here).
    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Read
    }

    /// Run the tool.
    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolExecResult;
}

/// Unifies [`ToolRegistry`] and [`RestrictedToolView`] behind one dispatch
/// seam, so an engine tier (`L1FastTrack`, `L3ReActEngine`) can be handed
/// either a top-level registry or a sub-agent's restricted view without
/// caring which.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    /// Schemas visible at the given tier through this view.
    fn schemas_for(&self, tier: Tier) -> Vec<LlmToolDefinition>;

    /// Execute a tool by name, returning the canonical JSON result string.
    async fn execute(&self, name: &str, args: Value, ctx: &ToolContext) -> String;
}

#[async_trait]
impl ToolExecutor for ToolRegistry {
    fn schemas_for(&self, tier: Tier) -> Vec<LlmToolDefinition> {
        ToolRegistry::schemas_for(self, tier)
    }

    async fn execute(&self, name: &str, args: Value, ctx: &ToolContext) -> String {
        ToolRegistry::execute(self, name, args, ctx).await
    }
}

#[async_trait]
impl ToolExecutor for RestrictedToolView {
    fn schemas_for(&self, tier: Tier) -> Vec<LlmToolDefinition> {
        RestrictedToolView::schemas_for(self, tier)
    }

    async fn execute(&self, name: &str, args: Value, ctx: &ToolContext) -> String {
        RestrictedToolView::execute(self, name, args, ctx).await
    }
}

/// Truncate a tool's raw output to [`MAX_OUTPUT_CHARS`], appending a marker
/// if truncation occurred.
#[must_use]
pub fn truncate_output(output: String) -> String {
    if output.chars().count() <= MAX_OUTPUT_CHARS {
        return output;
    }
    let mut truncated: String = output.chars().take(MAX_OUTPUT_CHARS).collect();
    truncated.push_str("\n\n... (output truncated — exceeded 30000 character limit)");
    truncated
}

/// Serialize a tool outcome to the canonical wire format used everywhere a
/// [`ToolExecResult`] reaches the LLM: `{"status":"success",...data}` or
/// `{"status":"error","error":"..."}`.
#[must_use]
pub fn canonical_json(outcome: &ToolExecResult) -> String {
    match outcome {
        Ok(data) => {
            let mut obj = match data {
                Value::Object(map) => map.clone(),
                other => {
                    let mut map = serde_json::Map::new();
                    map.insert("result".to_string(), other.clone());
                    map
                },
            };
            obj.insert("status".to_string(), Value::String("success".to_string()));
            serde_json::to_string(&Value::Object(obj)).unwrap_or_else(|_| {
                r#"{"status":"error","error":"failed to serialize tool result"}"#.to_string()
            })
        },
        Err(err) => {
            serde_json::json!({"status": "error", "error": err.to_string()}).to_string()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_output_passes_short_strings_through() {
        assert_eq!(truncate_output("short".to_string()), "short");
    }

    #[test]
    fn truncate_output_marks_long_strings() {
        let long = "x".repeat(MAX_OUTPUT_CHARS + 100);
        let truncated = truncate_output(long);
        assert!(truncated.ends_with("... (output truncated — exceeded 30000 character limit)"));
    }

    #[test]
    fn canonical_json_success_merges_data_fields() {
        let outcome: ToolExecResult = Ok(serde_json::json!({"query": "X"}));
        let json = canonical_json(&outcome);
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["status"], "success");
        assert_eq!(parsed["query"], "X");
    }

    #[test]
    fn canonical_json_error_shape() {
        let outcome: ToolExecResult = Err(ToolError::UnknownTool("ghost".to_string()));
        let json = canonical_json(&outcome);
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["error"], "unknown tool: ghost");
    }
}
