//! Request-scoped correlation context.
//!
//! [`RequestContext`] wraps a [`tracing::Span`] carrying `session_id`,
//! `agent_depth`, and `route` fields. Entering it once per top-level
//! execution call correlates every log line emitted beneath it — including
//! inside concurrently fanned-out tool tasks, since `tracing` spans follow
//! the same task-local propagation the `Actor`'s `join_all` relies on for
//! `AmbientContext`.

use tracing::Span;

/// A request-scoped `tracing` span plus the component name it was opened
/// for.
#[derive(Debug, Clone)]
pub struct RequestContext {
    component: String,
    operation: Option<String>,
    session_id: Option<String>,
    agent_depth: Option<usize>,
    route: Option<String>,
}

impl RequestContext {
    /// Start building a context for the named component (e.g.
    /// `"execution_router"`, `"l3_react_engine"`).
    #[must_use]
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            operation: None,
            session_id: None,
            agent_depth: None,
            route: None,
        }
    }

    /// Attach the operation name (e.g. `"process_request"`).
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Attach the ambient session id.
    #[must_use]
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Attach the ambient agent depth.
    #[must_use]
    pub fn with_agent_depth(mut self, depth: usize) -> Self {
        self.agent_depth = Some(depth);
        self
    }

    /// Attach the execution route (`"standard"` / `"deep"`).
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Build the `tracing::Span` carrying the accumulated fields. Entering
    /// this span (via [`RequestContext::enter`] or `span().enter()`)
    /// correlates every nested log line.
    #[must_use]
    pub fn span(&self) -> Span {
        tracing::info_span!(
            "request",
            component = %self.component,
            operation = self.operation.as_deref().unwrap_or(""),
            session_id = self.session_id.as_deref().unwrap_or(""),
            agent_depth = self.agent_depth.unwrap_or(0),
            route = self.route.as_deref().unwrap_or(""),
        )
    }

    /// Enter the span for the remainder of the current scope, returning a
    /// guard that exits it on drop.
    #[must_use]
    pub fn enter(&self) -> RequestGuard {
        RequestGuard { _entered: self.span().entered() }
    }
}

/// Guard returned by [`RequestContext::enter`]; exits the span on drop.
pub struct RequestGuard {
    _entered: tracing::span::EnteredSpan,
}
