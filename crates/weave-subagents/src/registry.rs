//! `SubAgentRegistry`: the loaded, queryable SubAgent catalog.

use std::collections::HashMap;

use crate::definition::SubAgentDefinition;

/// An immutable catalog of loaded [`SubAgentDefinition`]s, built by
/// [`crate::load_dirs`].
#[derive(Debug, Clone, Default)]
pub struct SubAgentRegistry {
    agents: HashMap<String, SubAgentDefinition>,
}

impl SubAgentRegistry {
    pub(crate) fn from_definitions(agents: HashMap<String, SubAgentDefinition>) -> Self {
        Self { agents }
    }

    /// An empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a definition directly (used by embedding applications and
    /// tests that don't want to go through the filesystem loader).
    pub fn insert(&mut self, definition: SubAgentDefinition) {
        self.agents.insert(definition.name.clone(), definition);
    }

    /// Look up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SubAgentDefinition> {
        self.agents.get(name)
    }

    /// `(name, description)` pairs for every loaded SubAgent, used to build
    /// the `subagent_call` meta-tool's dynamic schema.
    #[must_use]
    pub fn catalog(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> =
            self.agents.values().map(|a| (a.name.clone(), a.description.clone())).collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}
