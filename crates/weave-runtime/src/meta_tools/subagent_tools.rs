//! `subagent_call`: the single meta-tool fronting the whole SubAgent
//! (delegated recursion) subsystem, dispatching by backend type.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use weave_core::AmbientContext;
use weave_llm::{LlmProvider, Message};
use weave_subagents::{CodeExecutorRegistry, SubAgentBackend, SubAgentDefinition, SubAgentRegistry};
use weave_tools::{RestrictedToolView, RiskLevel, TierSet, Tool, ToolContext, ToolError, ToolExecResult};

use crate::error::RuntimeError;
use crate::l3::{L3Config, L3ReActEngine};
use crate::todo_store::TodoStore;

fn runtime_err_to_tool_err(err: RuntimeError) -> ToolError {
    ToolError::ExecutionFailed(err.to_string())
}

/// Dispatches a `subagent_call` request to the named agent's backend,
/// depth-guarding and ambient-scoping the call on the way in.
pub struct SubAgentCallTool {
    registry: Arc<SubAgentRegistry>,
    code_executors: Arc<CodeExecutorRegistry>,
    llm: Arc<dyn LlmProvider>,
    todo_store: Arc<dyn TodoStore>,
    http_client: reqwest::Client,
}

impl SubAgentCallTool {
    /// Build the tool around the loaded SubAgent catalog and the
    /// collaborators its backends need: an LLM provider and Todo store for
    /// `local_react`'s nested engine, and a code-executor registry for
    /// `local_code`.
    #[must_use]
    pub fn new(
        registry: Arc<SubAgentRegistry>,
        code_executors: Arc<CodeExecutorRegistry>,
        llm: Arc<dyn LlmProvider>,
        todo_store: Arc<dyn TodoStore>,
    ) -> Self {
        Self { registry, code_executors, llm, todo_store, http_client: reqwest::Client::new() }
    }

    async fn dispatch(&self, definition: &SubAgentDefinition, task: &str, ctx: &ToolContext) -> ToolExecResult {
        match &definition.backend {
            SubAgentBackend::LocalReact { system_prompt, tool_filter } => {
                self.run_local_react(definition, system_prompt, tool_filter.as_deref(), task, ctx).await
            },
            SubAgentBackend::LocalCode { entry } => self.run_local_code(entry, task).await,
            SubAgentBackend::Http { endpoint } => self.run_http(endpoint, task, definition.timeout_ms).await,
        }
    }

    async fn run_local_react(
        &self,
        definition: &SubAgentDefinition,
        system_prompt: &str,
        tool_filter: Option<&[String]>,
        task: &str,
        ctx: &ToolContext,
    ) -> ToolExecResult {
        let parent = ctx
            .tool_registry
            .clone()
            .ok_or_else(|| ToolError::ExecutionFailed("no parent tool registry attached to context".to_string()))?;

        let view = match tool_filter {
            Some(names) => RestrictedToolView::new(parent, &names.to_vec(), &definition.name),
            None => RestrictedToolView::unrestricted(parent),
        };

        let timeout_seconds = (definition.timeout_ms / 1000).max(1);
        let config = L3Config {
            max_iterations: definition.max_iterations,
            timeout_seconds,
            max_llm_calls: definition.max_iterations,
        };
        let engine = L3ReActEngine::new(Arc::clone(&self.llm), Arc::clone(&self.todo_store), config);

        let messages = vec![Message::system(system_prompt), Message::user(task)];
        let result = engine.run_prepared("", messages, &view, ctx).await.map_err(runtime_err_to_tool_err)?;

        Ok(serde_json::json!({"reply": result.reply, "is_degraded": result.is_degraded}))
    }

    async fn run_local_code(&self, entry: &str, task: &str) -> ToolExecResult {
        let executor = self
            .code_executors
            .get(entry)
            .ok_or_else(|| ToolError::ExecutionFailed(format!("no code executor registered for entry: {entry}")))?;

        let reply = executor.execute(task).await.map_err(ToolError::ExecutionFailed)?;
        Ok(serde_json::json!({"reply": reply}))
    }

    async fn run_http(&self, endpoint: &str, task: &str, timeout_ms: u64) -> ToolExecResult {
        let reply = weave_subagents::call_http_backend(&self.http_client, endpoint, task, Duration::from_millis(timeout_ms))
            .await
            .map_err(|e| ToolError::ExecutionFailed(e.to_string()))?;
        Ok(serde_json::json!({"reply": reply}))
    }
}

#[async_trait]
impl Tool for SubAgentCallTool {
    fn name(&self) -> &str {
        "subagent_call"
    }

    fn description(&self) -> &str {
        "Delegate a task to a named sub-agent. See this tool's `agent` enum \
         for the currently available catalog."
    }

    fn input_schema(&self) -> Value {
        let names: Vec<String> = self.registry.catalog().into_iter().map(|(name, _)| name).collect();
        serde_json::json!({
            "type": "object",
            "properties": {
                "agent": {"type": "string", "enum": names},
                "task": {"type": "string"}
            },
            "required": ["agent", "task"]
        })
    }

    fn tiers(&self) -> TierSet {
        TierSet::L3_ONLY
    }

    fn risk_level(&self) -> RiskLevel {
        RiskLevel::Write
    }

    async fn execute(&self, args: Value, ctx: &ToolContext) -> ToolExecResult {
        let agent = args
            .get("agent")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::InvalidArguments("missing `agent`".to_string()))?;
        let task = args.get("task").and_then(Value::as_str).unwrap_or_default();

        let definition = self
            .registry
            .get(agent)
            .cloned()
            .ok_or_else(|| ToolError::ExecutionFailed(format!("unknown sub-agent: {agent}")))?;

        if AmbientContext::agent_depth() >= definition.max_depth {
            return Err(ToolError::DepthExceeded);
        }

        let depth_token = AmbientContext::set_agent_depth(AmbientContext::agent_depth() + 1);
        let session_token = AmbientContext::set_session_id("");

        let result = self.dispatch(&definition, task, ctx).await;

        AmbientContext::reset_session_id(session_token);
        AmbientContext::reset_agent_depth(depth_token);

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use weave_core::TodoItem;
    use weave_llm::{LlmResponse, LlmResult, LlmToolDefinition, StopReason, StreamBox, Usage};
    use weave_subagents::SubAgentCodeExecutor;
    use weave_tools::ToolRegistry;

    struct StubLlm;

    #[async_trait]
    impl LlmProvider for StubLlm {
        fn name(&self) -> &str {
            "stub"
        }
        fn model(&self) -> &str {
            "stub-model"
        }
        async fn stream(
            &self,
            _messages: &[Message],
            _tools: &[LlmToolDefinition],
            _system: &str,
        ) -> LlmResult<StreamBox> {
            unimplemented!()
        }
        async fn complete(
            &self,
            _messages: &[Message],
            _tools: &[LlmToolDefinition],
            _system: &str,
        ) -> LlmResult<LlmResponse> {
            Ok(LlmResponse {
                message: Message::assistant("sub-agent reply"),
                has_tool_calls: false,
                stop_reason: StopReason::EndTurn,
                usage: Usage { input_tokens: 1, output_tokens: 1 },
            })
        }
        fn max_context_length(&self) -> usize {
            10_000
        }
    }

    struct NoopTodoStore;

    #[async_trait]
    impl TodoStore for NoopTodoStore {
        async fn get(&self, _session_id: &str) -> crate::error::RuntimeResult<Vec<TodoItem>> {
            Ok(Vec::new())
        }
        async fn set(&self, _session_id: &str, _items: Vec<TodoItem>) -> crate::error::RuntimeResult<()> {
            Ok(())
        }
    }

    struct EchoExecutor;

    #[async_trait]
    impl SubAgentCodeExecutor for EchoExecutor {
        async fn execute(&self, task: &str) -> Result<String, String> {
            Ok(format!("handled: {task}"))
        }
    }

    fn local_react_def(max_depth: usize) -> SubAgentDefinition {
        SubAgentDefinition {
            name: "researcher".to_string(),
            description: "does research".to_string(),
            backend: SubAgentBackend::LocalReact {
                system_prompt: "You are a researcher.".to_string(),
                tool_filter: None,
            },
            max_iterations: 5,
            timeout_ms: 30_000,
            max_depth,
        }
    }

    fn ctx_with_registry() -> ToolContext {
        ToolContext::new(PathBuf::from("/tmp")).with_tool_registry(Arc::new(ToolRegistry::new()))
    }

    #[tokio::test]
    async fn local_react_dispatch_runs_a_nested_engine() {
        let mut registry = SubAgentRegistry::empty();
        registry.insert(local_react_def(3));
        let tool = SubAgentCallTool::new(
            Arc::new(registry),
            Arc::new(CodeExecutorRegistry::new()),
            Arc::new(StubLlm),
            Arc::new(NoopTodoStore),
        );

        let result = AmbientContext::root_scope("s1", async {
            tool.execute(serde_json::json!({"agent": "researcher", "task": "find X"}), &ctx_with_registry()).await
        })
        .await
        .unwrap();

        assert_eq!(result["reply"], "sub-agent reply");
    }

    #[tokio::test]
    async fn depth_at_the_ceiling_is_rejected() {
        let mut registry = SubAgentRegistry::empty();
        registry.insert(local_react_def(0));
        let tool = SubAgentCallTool::new(
            Arc::new(registry),
            Arc::new(CodeExecutorRegistry::new()),
            Arc::new(StubLlm),
            Arc::new(NoopTodoStore),
        );

        let result = AmbientContext::root_scope("s1", async {
            tool.execute(serde_json::json!({"agent": "researcher", "task": "find X"}), &ctx_with_registry()).await
        })
        .await;

        let err = result.unwrap_err();
        assert!(matches!(err, ToolError::DepthExceeded));
        assert_eq!(err.to_string(), "depth exceeded");
    }

    #[tokio::test]
    async fn ambient_depth_and_session_are_restored_after_the_call() {
        let mut registry = SubAgentRegistry::empty();
        registry.insert(local_react_def(3));
        let tool = SubAgentCallTool::new(
            Arc::new(registry),
            Arc::new(CodeExecutorRegistry::new()),
            Arc::new(StubLlm),
            Arc::new(NoopTodoStore),
        );

        AmbientContext::root_scope("s1", async {
            tool.execute(serde_json::json!({"agent": "researcher", "task": "find X"}), &ctx_with_registry())
                .await
                .unwrap();

            assert_eq!(AmbientContext::agent_depth(), 0);
            assert_eq!(AmbientContext::session_id(), "s1");
        })
        .await;
    }

    #[tokio::test]
    async fn local_code_dispatch_calls_the_registered_executor() {
        let mut registry = SubAgentRegistry::empty();
        registry.insert(SubAgentDefinition {
            name: "coder".to_string(),
            description: "runs code".to_string(),
            backend: SubAgentBackend::LocalCode { entry: "echo_agent".to_string() },
            max_iterations: 1,
            timeout_ms: 30_000,
            max_depth: 3,
        });
        let mut executors = CodeExecutorRegistry::new();
        executors.register("echo_agent", Arc::new(EchoExecutor));

        let tool = SubAgentCallTool::new(
            Arc::new(registry),
            Arc::new(executors),
            Arc::new(StubLlm),
            Arc::new(NoopTodoStore),
        );

        let result = AmbientContext::root_scope("s1", async {
            tool.execute(serde_json::json!({"agent": "coder", "task": "build it"}), &ctx_with_registry()).await
        })
        .await
        .unwrap();

        assert_eq!(result["reply"], "handled: build it");
    }

    #[tokio::test]
    async fn unknown_agent_is_a_structured_error() {
        let tool = SubAgentCallTool::new(
            Arc::new(SubAgentRegistry::empty()),
            Arc::new(CodeExecutorRegistry::new()),
            Arc::new(StubLlm),
            Arc::new(NoopTodoStore),
        );

        let result = AmbientContext::root_scope("s1", async {
            tool.execute(serde_json::json!({"agent": "ghost", "task": "x"}), &ctx_with_registry()).await
        })
        .await;

        assert!(result.is_err());
    }
}
