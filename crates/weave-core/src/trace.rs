//! `ReasoningTrace`: the per-step audit record kept by the `Observer`.

use serde::{Deserialize, Serialize};

/// Token accounting for a single LLM call.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Prompt tokens.
    pub input_tokens: usize,
    /// Completion tokens.
    pub output_tokens: usize,
}

impl TokenUsage {
    /// Sum of input and output tokens.
    #[must_use]
    pub fn total(&self) -> usize {
        self.input_tokens.saturating_add(self.output_tokens)
    }

    /// Accumulate another usage record into this one.
    pub fn add(&mut self, other: TokenUsage) {
        self.input_tokens = self.input_tokens.saturating_add(other.input_tokens);
        self.output_tokens = self.output_tokens.saturating_add(other.output_tokens);
    }
}

/// One Think→Act cycle, recorded for audit export and degradation
/// summarization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasoningStep {
    /// 0-based step index within the execution.
    pub step: usize,
    /// The LLM's thought text for this step.
    pub thought: String,
    /// Tool names invoked this step, in request order.
    pub actions: Vec<String>,
    /// Truncated observation strings, one per action, in the same order.
    pub observations: Vec<String>,
    /// Tokens spent on this step's Think call.
    pub tokens_used: TokenUsage,
}

/// Ordered sequence of [`ReasoningStep`]s for one `L3ReActEngine` execution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReasoningTrace {
    /// Steps recorded so far, in order.
    pub steps: Vec<ReasoningStep>,
}

impl ReasoningTrace {
    /// An empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a completed step.
    pub fn push(&mut self, step: ReasoningStep) {
        self.steps.push(step);
    }

    /// Total tokens spent across all recorded steps.
    #[must_use]
    pub fn total_tokens(&self) -> TokenUsage {
        let mut total = TokenUsage::default();
        for step in &self.steps {
            total.add(step.tokens_used);
        }
        total
    }

    /// Concatenate every step's observation strings, each hard-truncated to
    /// `max_len` characters, for use in a graceful-degradation summary. No
    /// additional LLM call is involved.
    #[must_use]
    pub fn degradation_summary(&self, max_len: usize) -> Option<String> {
        let mut lines = Vec::new();
        for step in &self.steps {
            for (action, observation) in step.actions.iter().zip(&step.observations) {
                let truncated: String = observation.chars().take(max_len).collect();
                lines.push(format!("{action}: {truncated}"));
            }
        }
        if lines.is_empty() {
            None
        } else {
            Some(lines.join("\n"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degradation_summary_is_none_without_observations() {
        let trace = ReasoningTrace::new();
        assert!(trace.degradation_summary(500).is_none());
    }

    #[test]
    fn degradation_summary_truncates_each_observation() {
        let mut trace = ReasoningTrace::new();
        trace.push(ReasoningStep {
            step: 0,
            thought: "searching".to_string(),
            actions: vec!["web_search".to_string()],
            observations: vec!["x".repeat(1000)],
            tokens_used: TokenUsage::default(),
        });

        let summary = trace.degradation_summary(10).unwrap();
        assert_eq!(summary, format!("web_search: {}", "x".repeat(10)));
    }

    #[test]
    fn total_tokens_sums_across_steps() {
        let mut trace = ReasoningTrace::new();
        trace.push(ReasoningStep {
            tokens_used: TokenUsage { input_tokens: 10, output_tokens: 5 },
            ..Default::default()
        });
        trace.push(ReasoningStep {
            tokens_used: TokenUsage { input_tokens: 3, output_tokens: 2 },
            ..Default::default()
        });

        let total = trace.total_tokens();
        assert_eq!(total.input_tokens, 13);
        assert_eq!(total.output_tokens, 7);
    }
}
