//! `Observer`: iteration/time/call-count bookkeeping and the reasoning
//! trace, per §4.7.

use std::time::{Duration, Instant};

use weave_core::{ReasoningStep, ReasoningTrace};

use crate::actor::Observation;
use crate::thinker::ThinkResult;

/// Why the engine stopped early (a [`Observer::should_stop`] outcome).
pub const STOP_REASON_TIMEOUT: &str = "timeout";
/// See [`STOP_REASON_TIMEOUT`].
pub const STOP_REASON_BUDGET: &str = "budget";

/// Tracks elapsed time, LLM-call count, and the accumulating reasoning
/// trace for one `L3ReActEngine` execution.
pub struct Observer {
    trace: ReasoningTrace,
    pending: Option<ReasoningStep>,
    started_at: Instant,
    llm_call_count: usize,
    timeout: Duration,
    max_llm_calls: usize,
}

impl Observer {
    /// Build an observer with the engine's configured budgets.
    #[must_use]
    pub fn new(timeout_seconds: u64, max_llm_calls: usize) -> Self {
        Self {
            trace: ReasoningTrace::new(),
            pending: None,
            started_at: Instant::now(),
            llm_call_count: 0,
            timeout: Duration::from_secs(timeout_seconds),
            max_llm_calls,
        }
    }

    /// Record a completed Think call, opening a pending step that
    /// [`Observer::on_act`] (or [`Observer::finish_step`], if the step had
    /// no Act phase) will close.
    pub fn on_think(&mut self, step: usize, think: &ThinkResult) {
        self.llm_call_count = self.llm_call_count.saturating_add(1);
        self.pending = Some(ReasoningStep {
            step,
            thought: think.thought.clone(),
            actions: Vec::new(),
            observations: Vec::new(),
            tokens_used: think.tokens_used,
        });
    }

    /// Record the Act phase's observations against the currently pending
    /// step and push it onto the trace.
    pub fn on_act(&mut self, observations: &[Observation]) {
        if let Some(mut step) = self.pending.take() {
            step.actions = observations.iter().map(|o| o.tool_name.clone()).collect();
            step.observations = observations.iter().map(|o| o.result_json.clone()).collect();
            self.trace.push(step);
        }
    }

    /// Close a pending step that had no Act phase (the `is_done` case),
    /// pushing it onto the trace as-is.
    pub fn finish_step(&mut self) {
        if let Some(step) = self.pending.take() {
            self.trace.push(step);
        }
    }

    /// Evaluate, in order: elapsed-time budget, then call-count budget.
    #[must_use]
    pub fn should_stop(&self) -> (bool, Option<&'static str>) {
        if self.started_at.elapsed() > self.timeout {
            return (true, Some(STOP_REASON_TIMEOUT));
        }
        if self.llm_call_count >= self.max_llm_calls {
            return (true, Some(STOP_REASON_BUDGET));
        }
        (false, None)
    }

    /// The trace recorded so far.
    #[must_use]
    pub fn trace(&self) -> &ReasoningTrace {
        &self.trace
    }

    /// Consume the observer, returning its accumulated trace.
    #[must_use]
    pub fn into_trace(self) -> ReasoningTrace {
        self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use weave_core::TokenUsage;

    fn think(thought: &str) -> ThinkResult {
        ThinkResult { thought: thought.to_string(), tool_calls: vec![], is_done: true, tokens_used: TokenUsage::default() }
    }

    #[test]
    fn should_stop_false_within_budgets() {
        let observer = Observer::new(60, 10);
        assert_eq!(observer.should_stop(), (false, None));
    }

    #[test]
    fn should_stop_true_once_call_budget_exhausted() {
        let mut observer = Observer::new(60, 1);
        observer.on_think(0, &think("x"));
        observer.finish_step();
        assert_eq!(observer.should_stop(), (true, Some(STOP_REASON_BUDGET)));
    }

    #[test]
    fn should_stop_true_once_timeout_elapsed() {
        let observer = Observer::new(0, 100);
        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(observer.should_stop(), (true, Some(STOP_REASON_TIMEOUT)));
    }

    #[test]
    fn on_think_then_on_act_produces_one_complete_step() {
        let mut observer = Observer::new(60, 10);
        observer.on_think(0, &think("searching"));
        let observations = vec![Observation {
            tool_name: "web_search".to_string(),
            tool_call_id: "1".to_string(),
            arguments: serde_json::json!({}),
            result_json: "{\"status\":\"success\"}".to_string(),
            duration_ms: 5,
        }];
        observer.on_act(&observations);

        assert_eq!(observer.trace().steps.len(), 1);
        assert_eq!(observer.trace().steps[0].actions, vec!["web_search".to_string()]);
    }

    #[test]
    fn finish_step_closes_a_pending_step_with_no_actions() {
        let mut observer = Observer::new(60, 10);
        observer.on_think(0, &think("done"));
        observer.finish_step();
        assert_eq!(observer.trace().steps.len(), 1);
        assert!(observer.trace().steps[0].actions.is_empty());
    }
}
