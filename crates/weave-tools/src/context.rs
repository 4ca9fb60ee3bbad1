//! Shared context threaded into every tool invocation.

use std::path::PathBuf;
use std::sync::Arc;

use crate::registry::ToolRegistry;

/// Ambient information every [`crate::Tool::execute`] call receives.
///
/// Deliberately small: the orchestration core does not know what concrete
/// tools an embedding application registers, so this only carries what is
/// genuinely common to all of them (a working directory for tools that
/// touch the filesystem or spawn subprocesses, e.g. `skill_exec`).
#[derive(Debug, Clone)]
pub struct ToolContext {
    /// Working directory tools should treat as their sandbox root.
    pub workspace_root: PathBuf,
    /// The parent registry a call is being dispatched through, if any.
    ///
    /// Threaded per-call rather than stored inside a `Tool` itself so that
    /// `subagent_call` (a tool living alongside the registry it needs to
    /// see, in order to build a `RestrictedToolView` over it) can reach the
    /// registry without the registry ending up owning a permanent `Arc`
    /// reference to one of its own tools — which would be a reference
    /// cycle.
    pub tool_registry: Option<Arc<ToolRegistry>>,
}

impl ToolContext {
    /// Build a new context rooted at the given directory, with no parent
    /// registry attached.
    #[must_use]
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root, tool_registry: None }
    }

    /// Attach the parent registry this context's calls are dispatched
    /// through.
    #[must_use]
    pub fn with_tool_registry(mut self, registry: Arc<ToolRegistry>) -> Self {
        self.tool_registry = Some(registry);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_context_has_no_parent_registry() {
        let ctx = ToolContext::new(PathBuf::from("/tmp"));
        assert!(ctx.tool_registry.is_none());
    }

    #[test]
    fn with_tool_registry_attaches_the_parent() {
        let ctx = ToolContext::new(PathBuf::from("/tmp")).with_tool_registry(Arc::new(ToolRegistry::new()));
        assert!(ctx.tool_registry.is_some());
    }
}
