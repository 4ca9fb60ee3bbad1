//! Scoped ambient context: `session_id` and `agent_depth`.
//!
//! Modeled on Python's `contextvars.ContextVar` (see the original
//! implementation's `session_context.py` / `agent_context.py`): two
//! independently scoped values, each with `get`, `set -> token`, and
//! `reset(token)`. Rust has no direct analogue of a mutable, task-scoped
//! cell with manual token-based rollback, so this is built on
//! `tokio::task_local!` holding a `RefCell` — the task-local establishes one
//! mutable cell per task via [`AmbientContext::root_scope`], and `set`/`reset`
//! mutate that cell in place, exactly like a `ContextVar.set()`/`.reset()`
//! pair.
//!
//! Because `futures::future::join_all` polls its children concurrently
//! *within the same task* (no `tokio::spawn`), tool fan-out in the `Actor`
//! inherits the ambient context for free — there is no separate propagation
//! step needed for that case. Code that does need true OS-level parallelism
//! must capture the current values and re-establish them inside the new
//! task's root scope itself.

use std::cell::RefCell;
use std::future::Future;

tokio::task_local! {
    static SESSION_ID: RefCell<String>;
    static AGENT_DEPTH: RefCell<usize>;
}

/// Ambient, request-scoped execution context.
///
/// `session_id` is empty inside a sub-agent subtree (disabling Todo
/// reads/writes for that subtree); `agent_depth` is 0 at the top level and
/// incremented by one per nested `subagent_call`.
pub struct AmbientContext;

/// Token returned by [`AmbientContext::set_session_id`]; pass to
/// [`AmbientContext::reset_session_id`] to restore the prior value.
#[derive(Debug)]
pub struct SessionIdToken(String);

/// Token returned by [`AmbientContext::set_agent_depth`]; pass to
/// [`AmbientContext::reset_agent_depth`] to restore the prior value.
#[derive(Debug)]
pub struct AgentDepthToken(usize);

impl AmbientContext {
    /// Establish the root scope for a request chain, defaulting
    /// `session_id` to the given value and `agent_depth` to 0.
    ///
    /// Every top-level entry point (a fresh HTTP request, a CLI turn) must
    /// wrap its execution in this scope exactly once; nested `subagent_call`
    /// invocations use [`AmbientContext::set_session_id`] /
    /// [`AmbientContext::set_agent_depth`] within that same scope rather than
    /// establishing a new root.
    pub async fn root_scope<F: Future>(session_id: impl Into<String>, fut: F) -> F::Output {
        let session_id = session_id.into();
        SESSION_ID
            .scope(RefCell::new(session_id), AGENT_DEPTH.scope(RefCell::new(0), fut))
            .await
    }

    /// Current ambient `session_id`. Empty string means "no session" (the
    /// sub-agent guard: Todo reads/writes become no-ops).
    #[must_use]
    pub fn session_id() -> String {
        SESSION_ID.with(|cell| cell.borrow().clone())
    }

    /// Current ambient `agent_depth`.
    #[must_use]
    pub fn agent_depth() -> usize {
        AGENT_DEPTH.with(|cell| *cell.borrow())
    }

    /// Set the ambient `session_id`, returning a token that restores the
    /// prior value when passed to [`AmbientContext::reset_session_id`].
    pub fn set_session_id(value: impl Into<String>) -> SessionIdToken {
        SESSION_ID.with(|cell| {
            let prior = cell.replace(value.into());
            SessionIdToken(prior)
        })
    }

    /// Restore a previously captured `session_id`.
    pub fn reset_session_id(token: SessionIdToken) {
        SESSION_ID.with(|cell| {
            *cell.borrow_mut() = token.0;
        });
    }

    /// Set the ambient `agent_depth`, returning a token that restores the
    /// prior value when passed to [`AmbientContext::reset_agent_depth`].
    pub fn set_agent_depth(value: usize) -> AgentDepthToken {
        AGENT_DEPTH.with(|cell| {
            let prior = cell.replace(value);
            AgentDepthToken(prior)
        })
    }

    /// Restore a previously captured `agent_depth`.
    pub fn reset_agent_depth(token: AgentDepthToken) {
        AGENT_DEPTH.with(|cell| {
            *cell.borrow_mut() = token.0;
        });
    }
}
