//! `L3ReActEngine`: the full Think→Act→Observe loop, with a reasoning
//! trace and budget-driven graceful degradation.

use std::sync::Arc;
use std::time::Instant;

use weave_core::{ChatMessage, ChatRole, ExecutionResult, ExecutionSource, TodoItem, TokenUsage};
use weave_events::{EngineEvent, EventBus};
use weave_llm::{LlmProvider, Message};
use weave_tools::{Tier, ToolContext, ToolExecutor};

use crate::actor::Actor;
use crate::error::RuntimeResult;
use crate::observer::Observer;
use crate::thinker::Thinker;
use crate::todo_store::{TodoInjector, TodoStore};

/// Default, timeout, and budget knobs for one `L3ReActEngine` execution.
#[derive(Debug, Clone, Copy)]
pub struct L3Config {
    /// Hard cap on Think→Act iterations, independent of the call-count and
    /// time budgets below — belt and suspenders against a pathological loop.
    pub max_iterations: usize,
    /// Wall-clock budget for the whole execution.
    pub timeout_seconds: u64,
    /// Maximum number of Think (LLM) calls.
    pub max_llm_calls: usize,
}

impl Default for L3Config {
    fn default() -> Self {
        Self { max_iterations: 25, timeout_seconds: 300, max_llm_calls: 30 }
    }
}

/// Apology used when a degraded execution has no observations to summarize.
const CANNED_DEGRADE_REPLY: &str =
    "I wasn't able to finish this within the time or step budget available. \
     Here is what I found before stopping.";

/// The deep ReAct loop: Think, Act, Observe, repeat, with Todo re-injection
/// each iteration and a synthesized reply (no extra LLM call) if a budget is
/// exhausted before the model produces a final answer.
pub struct L3ReActEngine {
    llm: Arc<dyn LlmProvider>,
    todo_store: Arc<dyn TodoStore>,
    config: L3Config,
}

impl L3ReActEngine {
    /// Build an engine around a shared LLM provider and Todo-list backing
    /// store.
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>, todo_store: Arc<dyn TodoStore>, config: L3Config) -> Self {
        Self { llm, todo_store, config }
    }

    /// Run a fresh turn: assemble the system prompt, bounded history, and
    /// the new user utterance into the initial message list, then drive the
    /// loop to completion.
    pub async fn run(
        &self,
        session_id: &str,
        system_prompt: &str,
        history: &[ChatMessage],
        user_input: &str,
        executor: &dyn ToolExecutor,
        ctx: &ToolContext,
    ) -> RuntimeResult<ExecutionResult> {
        let messages = build_initial_messages(system_prompt, history, user_input);
        self.run_prepared(session_id, messages, executor, ctx).await
    }

    /// Run the loop over an already-assembled message list. Used directly
    /// by `subagent_call`'s `local_react` backend, which builds its own
    /// system prompt and task message rather than going through
    /// [`L3ReActEngine::run`].
    pub async fn run_prepared(
        &self,
        session_id: &str,
        messages: Vec<Message>,
        executor: &dyn ToolExecutor,
        ctx: &ToolContext,
    ) -> RuntimeResult<ExecutionResult> {
        self.execute_loop(session_id, messages, executor, ctx, None).await
    }

    /// Identical to [`L3ReActEngine::run_prepared`], additionally publishing
    /// [`EngineEvent`]s for every lifecycle step to `events`.
    pub async fn run_streaming(
        &self,
        session_id: &str,
        messages: Vec<Message>,
        executor: &dyn ToolExecutor,
        ctx: &ToolContext,
        events: &EventBus,
    ) -> RuntimeResult<ExecutionResult> {
        self.execute_loop(session_id, messages, executor, ctx, Some(events)).await
    }

    #[allow(clippy::too_many_lines)]
    async fn execute_loop(
        &self,
        session_id: &str,
        mut messages: Vec<Message>,
        executor: &dyn ToolExecutor,
        ctx: &ToolContext,
        events: Option<&EventBus>,
    ) -> RuntimeResult<ExecutionResult> {
        let started = Instant::now();
        let thinker = Thinker::new(Arc::clone(&self.llm));
        let mut observer = Observer::new(self.config.timeout_seconds, self.config.max_llm_calls);

        let mut tool_calls = Vec::new();
        let mut step: u32 = 0;
        let mut stop_reason: Option<&'static str> = None;

        loop {
            let (should_stop, reason) = observer.should_stop();
            if should_stop {
                stop_reason = reason;
                break;
            }
            if step as usize >= self.config.max_iterations {
                stop_reason = Some("budget");
                break;
            }

            // Layer 3 of the Todo mechanism: re-read and re-inject the
            // current snapshot into `messages[0]` on every iteration, not
            // just at startup, so a mid-loop `todo_write` is reflected
            // before the next Think call.
            let todos = self.todo_store.get(session_id).await?;
            inject_todos(&mut messages, &todos);

            if let Some(bus) = events {
                bus.publish(EngineEvent::status("thinking"));
            }

            let is_final_step = (step as usize) + 1 >= self.config.max_iterations;
            let tools = if is_final_step { None } else { Some(executor.schemas_for(Tier::L3)) };
            let system = messages.first().and_then(Message::text).unwrap_or_default().to_string();
            let think = thinker.think(&messages[1..], tools.as_deref(), &system).await?;
            observer.on_think(step as usize, &think);

            if think.is_done || is_final_step {
                observer.finish_step();
                if let Some(bus) = events {
                    bus.publish(EngineEvent::delta(think.thought.clone()));
                    bus.publish(EngineEvent::finish(
                        step + 1,
                        observer.trace().total_tokens().total() as u64,
                        false,
                        None,
                    ));
                }
                return Ok(build_result(
                    think.thought,
                    tool_calls,
                    observer.into_trace(),
                    (step + 1) as usize,
                    started.elapsed().as_millis(),
                    false,
                    None,
                ));
            }

            if let Some(bus) = events {
                bus.publish(EngineEvent::thought(step, think.thought.clone()));
            }

            let (appended, observations) = Actor::act(&think, executor, ctx).await;
            if let Some(bus) = events {
                for obs in &observations {
                    bus.publish(EngineEvent::tool_call(Some(step), obs.tool_name.clone(), obs.arguments.clone()));
                    let result_value =
                        serde_json::from_str(&obs.result_json).unwrap_or(serde_json::Value::Null);
                    bus.publish(EngineEvent::tool_result(Some(step), obs.tool_name.clone(), result_value));
                }
            }

            messages.extend(appended);
            observer.on_act(&observations);
            tool_calls.extend(observations);
            step += 1;
        }

        let trace = observer.into_trace();
        let reply = trace.degradation_summary(500).unwrap_or_else(|| CANNED_DEGRADE_REPLY.to_string());
        let reason = stop_reason.map(ToString::to_string);

        if let Some(bus) = events {
            bus.publish(EngineEvent::finish(step, trace.total_tokens().total() as u64, true, reason.clone()));
        }

        Ok(build_result(reply, tool_calls, trace, step as usize, started.elapsed().as_millis(), true, reason))
    }
}

pub(crate) fn build_initial_messages(system_prompt: &str, history: &[ChatMessage], user_input: &str) -> Vec<Message> {
    let mut messages = vec![Message::system(system_prompt)];
    for turn in history {
        let message = match turn.role {
            ChatRole::User => Message::user(turn.content.clone()),
            ChatRole::Assistant => Message::assistant(turn.content.clone()),
        };
        messages.push(message);
    }
    messages.push(Message::user(user_input));
    messages
}

fn inject_todos(messages: &mut [Message], todos: &[TodoItem]) {
    if let Some(first) = messages.first_mut() {
        if let Some(text) = first.text() {
            let injected = TodoInjector::inject(text, todos);
            *first = Message::system(injected);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn build_result(
    reply: String,
    tool_calls: Vec<crate::actor::Observation>,
    trace: weave_core::ReasoningTrace,
    iterations: usize,
    duration_ms: u128,
    is_degraded: bool,
    degrade_reason: Option<String>,
) -> ExecutionResult {
    let token_usage: TokenUsage = trace.total_tokens();
    ExecutionResult {
        reply,
        tool_calls,
        source: ExecutionSource::L3,
        duration_ms: u64::try_from(duration_ms).unwrap_or(u64::MAX),
        reasoning_trace: Some(trace),
        iterations,
        token_usage,
        is_degraded,
        degrade_reason,
    }
}
