//! `Actor`: concurrent execution of one step's tool requests.

use std::time::Instant;

use futures::future::join_all;
use weave_core::ToolCallSummary;
use weave_llm::{Message, ToolCallResult};
use weave_tools::{ToolContext, ToolExecutor};

use crate::thinker::ThinkResult;

/// One tool call's recorded outcome. An alias of [`ToolCallSummary`] — the
/// spec's "Observation" and the outward-facing per-call record the caller
/// ultimately sees are the same shape, so there is no separate type here.
pub type Observation = ToolCallSummary;

/// Turns a [`ThinkResult`] into appended messages and observations.
pub struct Actor;

impl Actor {
    /// Build the assistant-with-tool-calls message, execute every request
    /// concurrently, and append one `tool` message per result — in the
    /// original request order, per §4.6/§5.
    ///
    /// Tool exceptions never propagate out of this call: [`ToolExecutor`]
    /// already converts panics and internal errors into a structured
    /// `{"status":"error",...}` payload, so every observation here is a
    /// completed result, success or failure. Cancellation is the one thing
    /// that does propagate — it surfaces as this future itself being
    /// dropped mid-`join_all`, not as a returned error.
    pub async fn act(
        think: &ThinkResult,
        executor: &dyn ToolExecutor,
        ctx: &ToolContext,
    ) -> (Vec<Message>, Vec<Observation>) {
        let mut messages = vec![Message::assistant_with_tools(think.tool_calls.clone())];

        let calls = &think.tool_calls;
        let futures = calls.iter().map(|call| async move {
            let started = Instant::now();
            let result_json = executor.execute(&call.name, call.arguments.clone(), ctx).await;
            let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            (call, result_json, duration_ms)
        });

        let results = join_all(futures).await;

        let mut observations = Vec::with_capacity(results.len());
        for (call, result_json, duration_ms) in results {
            let is_error = is_error_payload(&result_json);
            let tool_result = if is_error {
                ToolCallResult::error(call.id.clone(), result_json.clone())
            } else {
                ToolCallResult::success(call.id.clone(), result_json.clone())
            };
            messages.push(Message::tool_result(tool_result));

            observations.push(Observation {
                tool_name: call.name.clone(),
                tool_call_id: call.id.clone(),
                arguments: call.arguments.clone(),
                result_json,
                duration_ms,
            });
        }

        (messages, observations)
    }
}

fn is_error_payload(result_json: &str) -> bool {
    serde_json::from_str::<serde_json::Value>(result_json)
        .ok()
        .and_then(|value| value.get("status").and_then(|s| s.as_str()).map(str::to_string))
        .is_some_and(|status| status == "error")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use weave_llm::ToolCall;
    use weave_tools::Tier;

    struct RecordingExecutor {
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl ToolExecutor for RecordingExecutor {
        fn schemas_for(&self, _tier: Tier) -> Vec<weave_llm::LlmToolDefinition> {
            Vec::new()
        }

        async fn execute(&self, name: &str, _args: serde_json::Value, _ctx: &ToolContext) -> String {
            self.calls.lock().await.push(name.to_string());
            if name == "fails" {
                r#"{"status":"error","error":"boom"}"#.to_string()
            } else {
                format!(r#"{{"status":"success","tool":"{name}"}}"#)
            }
        }
    }

    fn ctx() -> ToolContext {
        ToolContext::new(PathBuf::from("/tmp"))
    }

    #[tokio::test]
    async fn act_appends_assistant_then_tool_results_in_request_order() {
        let think = ThinkResult {
            tool_calls: vec![ToolCall::new("1", "alpha"), ToolCall::new("2", "beta")],
            is_done: false,
            ..Default::default()
        };
        let executor = RecordingExecutor { calls: Arc::new(Mutex::new(Vec::new())) };

        let (messages, observations) = Actor::act(&think, &executor, &ctx()).await;

        assert_eq!(messages.len(), 3); // assistant + 2 tool results
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].tool_name, "alpha");
        assert_eq!(observations[1].tool_name, "beta");
    }

    #[tokio::test]
    async fn failed_tool_call_becomes_error_observation_not_a_propagated_error() {
        let think = ThinkResult { tool_calls: vec![ToolCall::new("1", "fails")], is_done: false, ..Default::default() };
        let executor = RecordingExecutor { calls: Arc::new(Mutex::new(Vec::new())) };

        let (_messages, observations) = Actor::act(&think, &executor, &ctx()).await;

        assert!(observations[0].result_json.contains("error"));
    }

    #[tokio::test]
    async fn all_requests_run_concurrently() {
        let think = ThinkResult {
            tool_calls: vec![ToolCall::new("1", "a"), ToolCall::new("2", "b"), ToolCall::new("3", "c")],
            is_done: false,
            ..Default::default()
        };
        let calls = Arc::new(Mutex::new(Vec::new()));
        let executor = RecordingExecutor { calls: Arc::clone(&calls) };

        Actor::act(&think, &executor, &ctx()).await;

        assert_eq!(calls.lock().await.len(), 3);
    }
}
