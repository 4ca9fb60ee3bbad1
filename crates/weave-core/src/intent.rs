//! The typed result handed to the execution core by the (out-of-scope)
//! intent understanding pipeline.

use serde::{Deserialize, Serialize};

/// Which execution tier a request should be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Bounded tool loop (`L1FastTrack`).
    Standard,
    /// Full ReAct loop with budgets and a reasoning trace (`L3ReActEngine`).
    Deep,
}

/// A single turn of conversation history. Roles are restricted to
/// `user`/`assistant` — the system prompt is assembled separately by the
/// engine, never carried in history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Speaker.
    pub role: ChatRole,
    /// Message text.
    pub content: String,
}

/// Restricted role set for `IntentResult::history_messages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    /// A past user utterance.
    User,
    /// A past assistant reply.
    Assistant,
}

/// Immutable input to the execution core, produced by the (out-of-scope)
/// intent classification pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentResult {
    /// Which engine tier to run.
    pub route: Route,
    /// Free-form complexity label assigned by the classifier (e.g. `"low"`).
    pub complexity: String,
    /// Classifier confidence in `[0, 1]`.
    pub confidence: f64,
    /// The dominant recognized intent.
    pub primary_intent: String,
    /// A secondary intent, if the classifier detected one.
    pub sub_intent: Option<String>,
    /// A free-form statement of what the user is trying to accomplish.
    pub user_goal: Option<String>,
    /// The verbatim user utterance for this turn.
    pub raw_input: String,
    /// Bounded prior conversation turns, oldest first.
    pub history_messages: Vec<ChatMessage>,
}

impl IntentResult {
    /// Build a minimal intent result for a single-shot utterance with no
    /// prior history, routed to `L1FastTrack`.
    #[must_use]
    pub fn standard(raw_input: impl Into<String>, primary_intent: impl Into<String>) -> Self {
        Self {
            route: Route::Standard,
            complexity: "low".to_string(),
            confidence: 1.0,
            primary_intent: primary_intent.into(),
            sub_intent: None,
            user_goal: None,
            raw_input: raw_input.into(),
            history_messages: Vec::new(),
        }
    }

    /// Build a minimal intent result routed to the `L3ReActEngine`.
    #[must_use]
    pub fn deep(raw_input: impl Into<String>, primary_intent: impl Into<String>) -> Self {
        Self {
            route: Route::Deep,
            ..Self::standard(raw_input, primary_intent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_defaults_to_standard_route_and_empty_history() {
        let intent = IntentResult::standard("what is 2+2?", "general_qa");
        assert_eq!(intent.route, Route::Standard);
        assert!(intent.history_messages.is_empty());
    }

    #[test]
    fn deep_overrides_route_only() {
        let intent = IntentResult::deep("plan my trip", "travel_planning");
        assert_eq!(intent.route, Route::Deep);
        assert_eq!(intent.primary_intent, "travel_planning");
    }
}
