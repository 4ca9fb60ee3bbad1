//! `L1FastTrack`: the bounded tool loop for routine requests — no
//! reasoning trace, no Todo injection, a hard step ceiling.

use std::sync::Arc;
use std::time::Instant;

use weave_core::{ChatMessage, ChatRole, ExecutionResult, ExecutionSource, TokenUsage};
use weave_llm::{LlmProvider, Message};
use weave_tools::{Tier, ToolContext, ToolExecutor};

use crate::actor::{Actor, Observation};
use crate::error::RuntimeResult;
use crate::thinker::Thinker;

/// Default bound on `L1FastTrack` steps, per §4.8.
pub const DEFAULT_MAX_STEPS: usize = 3;

/// The bounded tool loop. Runs at most `max_steps` Think→Act iterations;
/// the final permitted step always omits tool schemas, forcing the model to
/// produce a textual reply rather than request yet another round of tools.
pub struct L1FastTrack {
    llm: Arc<dyn LlmProvider>,
    max_steps: usize,
}

impl L1FastTrack {
    /// Build a fast-track loop bounded at [`DEFAULT_MAX_STEPS`].
    #[must_use]
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self::with_max_steps(llm, DEFAULT_MAX_STEPS)
    }

    /// Build a fast-track loop with an explicit step bound.
    #[must_use]
    pub fn with_max_steps(llm: Arc<dyn LlmProvider>, max_steps: usize) -> Self {
        Self { llm, max_steps: max_steps.max(1) }
    }

    /// Run one turn to completion.
    pub async fn run(
        &self,
        system_prompt: &str,
        history: &[ChatMessage],
        user_input: &str,
        executor: &dyn ToolExecutor,
        ctx: &ToolContext,
    ) -> RuntimeResult<ExecutionResult> {
        let started = Instant::now();
        let thinker = Thinker::new(Arc::clone(&self.llm));
        let mut messages = build_initial_messages(system_prompt, history, user_input);
        let mut tool_calls: Vec<Observation> = Vec::new();
        let mut tokens = TokenUsage::default();

        for step in 0..self.max_steps {
            let is_final_step = step + 1 == self.max_steps;
            let tools = if is_final_step { None } else { Some(executor.schemas_for(Tier::L1)) };

            let think = thinker.think(&messages[1..], tools.as_deref(), system_prompt).await?;
            tokens.add(think.tokens_used);

            if think.is_done || is_final_step {
                return Ok(ExecutionResult {
                    reply: think.thought,
                    tool_calls,
                    source: ExecutionSource::L1,
                    duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
                    reasoning_trace: None,
                    iterations: step + 1,
                    token_usage: tokens,
                    is_degraded: false,
                    degrade_reason: None,
                });
            }

            let (appended, observations) = Actor::act(&think, executor, ctx).await;
            messages.extend(appended);
            tool_calls.extend(observations);
        }

        unreachable!("the final loop iteration always returns: is_final_step is true when step + 1 == max_steps")
    }
}

fn build_initial_messages(system_prompt: &str, history: &[ChatMessage], user_input: &str) -> Vec<Message> {
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
