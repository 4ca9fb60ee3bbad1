//! `ExecutionRouter`: the top-level entry point dispatching an already
//! classified turn to the right tier and wiring the meta-tools into the
//! shared tool catalog.

use std::sync::Arc;

use weave_core::{ExecutionResult, IntentResult, Route};
use weave_events::{EngineEvent, EventBus};
use weave_llm::LlmProvider;
use weave_skills::SkillRegistry;
use weave_subagents::{CodeExecutorRegistry, SubAgentRegistry};
use weave_tools::{ToolContext, ToolExecutor, ToolRegistry};

use crate::error::RuntimeResult;
use crate::l1::{DEFAULT_MAX_STEPS, L1FastTrack};
use crate::l3::{L3Config, L3ReActEngine};
use crate::meta_tools::{SkillCallTool, SkillExecTool, SubAgentCallTool, TodoReadTool, TodoWriteTool};
use crate::todo_store::TodoStore;

/// Bounds shared by both tiers built behind one `ExecutionRouter`.
#[derive(Debug, Clone, Copy)]
pub struct RouterConfig {
    /// Step ceiling passed to the [`L1FastTrack`].
    pub l1_max_steps: usize,
    /// Iteration/time/call budgets passed to the [`L3ReActEngine`].
    pub l3: L3Config,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self { l1_max_steps: DEFAULT_MAX_STEPS, l3: L3Config::default() }
    }
}

/// Owns the fully-assembled tool catalog (user tools plus the fixed
/// meta-tools) and both execution tiers, and dispatches a classified
/// [`IntentResult`] to whichever one its [`Route`] names.
///
/// [`Route`] is a closed two-variant enum (`Standard`/`Deep`); the match in
/// [`ExecutionRouter::execute`] is already exhaustive over it, so there is no
/// reachable "unknown route" branch to degrade from. If a future route
/// variant is added upstream, the compiler will flag this match as
/// non-exhaustive rather than letting it silently fall through.
pub struct ExecutionRouter {
    tools: Arc<ToolRegistry>,
    #[allow(dead_code)]
    skills: Arc<SkillRegistry>,
    #[allow(dead_code)]
    subagents: Arc<SubAgentRegistry>,
    l1: L1FastTrack,
    l3: L3ReActEngine,
}

impl ExecutionRouter {
    /// Assemble a router around the loaded catalogs and collaborators,
    /// using [`RouterConfig::default`] budgets.
    #[must_use]
    pub fn new(
        tools: ToolRegistry,
        skills: SkillRegistry,
        subagents: SubAgentRegistry,
        code_executors: CodeExecutorRegistry,
        llm: Arc<dyn LlmProvider>,
        todo_store: Arc<dyn TodoStore>,
    ) -> Self {
        Self::with_config(
            tools,
            skills,
            subagents,
            code_executors,
            llm,
            todo_store,
            RouterConfig::default(),
        )
    }

    /// Assemble a router with explicit tier budgets. Registers
    /// `skill_call`/`skill_exec`/`subagent_call`/`todo_write`/`todo_read`
    /// into `tools` in addition to whatever the caller already registered,
    /// so the returned catalog is the complete, final one an engine will see.
    #[must_use]
    pub fn with_config(
        mut tools: ToolRegistry,
        skills: SkillRegistry,
        subagents: SubAgentRegistry,
        code_executors: CodeExecutorRegistry,
        llm: Arc<dyn LlmProvider>,
        todo_store: Arc<dyn TodoStore>,
        config: RouterConfig,
    ) -> Self {
        let skills = Arc::new(skills);
        let subagents = Arc::new(subagents);
        let code_executors = Arc::new(code_executors);

        tools.register(Arc::new(SkillCallTool::new(Arc::clone(&skills))));
        tools.register(Arc::new(SkillExecTool::new(Arc::clone(&skills))));
        tools.register(Arc::new(SubAgentCallTool::new(
            Arc::clone(&subagents),
            code_executors,
            Arc::clone(&llm),
            Arc::clone(&todo_store),
        )));
        tools.register(Arc::new(TodoWriteTool::new(Arc::clone(&todo_store))));
        tools.register(Arc::new(TodoReadTool::new(Arc::clone(&todo_store))));

        let tools = Arc::new(tools);
        let l1 = L1FastTrack::with_max_steps(Arc::clone(&llm), config.l1_max_steps);
        let l3 = L3ReActEngine::new(llm, todo_store, config.l3);

        Self { tools, skills, subagents, l1, l3 }
    }

    /// The fully-assembled tool catalog, for attaching to a [`ToolContext`]
    /// (so nested `subagent_call` dispatch can reach it) or for introspection.
    #[must_use]
    pub fn tool_registry(&self) -> &Arc<ToolRegistry> {
        &self.tools
    }

    /// Run one turn to completion, dispatching by `intent.route`.
    pub async fn execute(
        &self,
        session_id: &str,
        system_prompt: &str,
        intent: &IntentResult,
        ctx: &ToolContext,
    ) -> RuntimeResult<ExecutionResult> {
        let executor: &dyn ToolExecutor = self.tools.as_ref();
        match intent.route {
            Route::Standard => {
                self.l1.run(system_prompt, &intent.history_messages, &intent.raw_input, executor, ctx).await
            },
            Route::Deep => {
                self.l3
                    .run(session_id, system_prompt, &intent.history_messages, &intent.raw_input, executor, ctx)
                    .await
            },
        }
    }

    /// Identical to [`ExecutionRouter::execute`], additionally publishing
    /// [`EngineEvent`]s to `events`. The fast-track tier has no intermediate
    /// reasoning to stream, so its run is bracketed by a single `Status` and
    /// a final `Delta`/`Finish` pair rather than per-step events.
    pub async fn execute_streaming(
        &self,
        session_id: &str,
        system_prompt: &str,
        intent: &IntentResult,
        ctx: &ToolContext,
        events: &EventBus,
    ) -> RuntimeResult<ExecutionResult> {
        let executor: &dyn ToolExecutor = self.tools.as_ref();
        match intent.route {
            Route::Standard => {
                events.publish(EngineEvent::status("thinking"));
                let result = self
                    .l1
                    .run(system_prompt, &intent.history_messages, &intent.raw_input, executor, ctx)
                    .await?;
                events.publish(EngineEvent::delta(result.reply.clone()));
                events.publish(EngineEvent::finish(
                    u32::try_from(result.iterations).unwrap_or(u32::MAX),
                    result.token_usage.total() as u64,
                    result.is_degraded,
                    result.degrade_reason.clone(),
                ));
                Ok(result)
            },
            Route::Deep => {
                let messages =
                    crate::l3::build_initial_messages(system_prompt, &intent.history_messages, &intent.raw_input);
                self.l3.run_streaming(session_id, messages, executor, ctx, events).await
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use weave_core::TodoItem;
    use weave_llm::{LlmResponse, LlmResult, LlmToolDefinition, Message, StopReason, StreamBox, Usage};

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
                message: Message::assistant("the answer"),
                has_tool_calls: false,
                stop_reason: StopReason::EndTurn,
                usage: Usage { input_tokens: 3, output_tokens: 2 },
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

    fn router() -> ExecutionRouter {
        ExecutionRouter::new(
            ToolRegistry::new(),
            SkillRegistry::empty(),
            SubAgentRegistry::empty(),
            CodeExecutorRegistry::new(),
            Arc::new(StubLlm),
            Arc::new(NoopTodoStore),
        )
    }

    fn ctx() -> ToolContext {
        ToolContext::new(PathBuf::from("/tmp"))
    }

    fn intent(route: Route) -> IntentResult {
        match route {
            Route::Standard => IntentResult::standard("what is 2+2?", "answer_question"),
            Route::Deep => IntentResult::deep("what is 2+2?", "answer_question"),
        }
    }

    #[test]
    fn router_registers_the_full_meta_tool_catalog() {
        let router = router();
        for name in ["skill_call", "skill_exec", "subagent_call", "todo_write", "todo_read"] {
            assert!(router.tool_registry().contains(name), "missing meta-tool: {name}");
        }
    }

    #[tokio::test]
    async fn standard_route_runs_the_fast_track_tier() {
        let router = router();
        let result = router.execute("s1", "You are helpful.", &intent(Route::Standard), &ctx()).await.unwrap();
        assert_eq!(result.source, weave_core::ExecutionSource::L1);
        assert_eq!(result.reply, "the answer");
    }

    #[tokio::test]
    async fn deep_route_runs_the_react_tier() {
        let router = router();
        let result = router.execute("s1", "You are helpful.", &intent(Route::Deep), &ctx()).await.unwrap();
        assert_eq!(result.source, weave_core::ExecutionSource::L3);
        assert_eq!(result.reply, "the answer");
    }

    #[tokio::test]
    async fn streaming_standard_route_publishes_a_finish_event() {
        let router = router();
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        router
            .execute_streaming("s1", "You are helpful.", &intent(Route::Standard), &ctx(), &bus)
            .await
            .unwrap();

        let mut saw_finish = false;
        while let Ok(event) = rx.try_recv() {
            if matches!(&*event, EngineEvent::Finish { .. }) {
                saw_finish = true;
            }
        }
        assert!(saw_finish);
    }
}
