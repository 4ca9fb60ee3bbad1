//! `SkillRegistry`: the loaded, queryable Skill catalog.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::definition::SkillDefinition;
use crate::error::{SkillError, SkillResult};

/// An immutable catalog of loaded [`SkillDefinition`]s, built by
/// [`crate::load_dirs`].
#[derive(Debug, Clone, Default)]
pub struct SkillRegistry {
    skills: HashMap<String, SkillDefinition>,
}

impl SkillRegistry {
    pub(crate) fn from_definitions(skills: HashMap<String, SkillDefinition>) -> Self {
        Self { skills }
    }

    /// An empty registry, for tests or a deployment with no Skills.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether a skill by this name is registered.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.skills.contains_key(name)
    }

    /// `(name, description)` pairs for every loaded Skill, used to build the
    /// `skill_call` meta-tool's dynamic schema.
    #[must_use]
    pub fn catalog(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .skills
            .values()
            .map(|s| (s.name.clone(), s.description.clone()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }

    /// The rendered instruction payload for a skill, as returned by
    /// `skill_call`.
    pub fn render(&self, name: &str) -> SkillResult<String> {
        self.skills
            .get(name)
            .map(SkillDefinition::render)
            .ok_or_else(|| SkillError::SkillNotFound(name.to_string()))
    }

    /// Path of a named script within a skill's allow-list.
    #[must_use]
    pub fn script_path(&self, skill: &str, script: &str) -> Option<PathBuf> {
        self.skills.get(skill)?.scripts.get(script).cloned()
    }

    /// All script names (file stems) allow-listed for a skill.
    #[must_use]
    pub fn script_names(&self, skill: &str) -> Option<Vec<String>> {
        let definition = self.skills.get(skill)?;
        let mut names: Vec<_> = definition.scripts.keys().cloned().collect();
        names.sort();
        Some(names)
    }

    /// The script execution timeout for a skill, in whole seconds.
    #[must_use]
    pub fn timeout_s(&self, skill: &str) -> Option<f64> {
        self.skills.get(skill).map(SkillDefinition::timeout_s)
    }

    /// Validate a `(skill, script)` pair against the allow-list, as
    /// `skill_exec` must before spawning anything.
    pub fn check_script_allowed(&self, skill: &str, script: &str) -> SkillResult<PathBuf> {
        match self.script_path(skill, script) {
            Some(path) => Ok(path),
            None if self.has(skill) => Err(SkillError::ScriptNotInAllowlist {
                skill: skill.to_string(),
                script: script.to_string(),
            }),
            None => Err(SkillError::SkillNotFound(skill.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_registry_has_no_skills() {
        let registry = SkillRegistry::empty();
        assert!(!registry.has("anything"));
        assert!(registry.render("anything").is_err());
    }

    #[test]
    fn check_script_allowed_distinguishes_unknown_skill_from_unknown_script() {
        let mut skills = HashMap::new();
        skills.insert(
            "lint".to_string(),
            SkillDefinition {
                name: "lint".to_string(),
                description: "lints".to_string(),
                body: "body".to_string(),
                scripts: [("check".to_string(), PathBuf::from("/x/check.py"))].into(),
                timeout_ms: 1000,
            },
        );
        let registry = SkillRegistry::from_definitions(skills);

        assert!(registry.check_script_allowed("lint", "check").is_ok());
        assert!(matches!(
            registry.check_script_allowed("lint", "ghost"),
            Err(SkillError::ScriptNotInAllowlist { .. })
        ));
        assert!(matches!(
            registry.check_script_allowed("ghost_skill", "check"),
            Err(SkillError::SkillNotFound(_))
        ));
    }
}
