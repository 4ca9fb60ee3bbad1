//! `SkillDefinition`: one loaded, immutable Skill.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{SkillError, SkillResult};

/// The YAML header every Skill definition file must carry.
#[derive(Debug, Deserialize)]
pub(crate) struct SkillFrontmatter {
    pub name: String,
    pub description: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    30_000
}

/// A loaded Skill: Markdown instructions plus an allow-list of named
/// scripts. Immutable after load — Skills are not mutated at runtime.
#[derive(Debug, Clone)]
pub struct SkillDefinition {
    /// Unique name, used as the `skill_call`/`skill_exec` argument.
    pub name: String,
    /// One-line description shown in the dynamically built `skill_call`
    /// schema.
    pub description: String,
    /// The Markdown instruction body, delivered verbatim as the
    /// `skill_call` tool result.
    pub body: String,
    /// Script name (file stem) → path, contributed by a `scripts/`
    /// subdirectory. These are never registered as LLM tools; they are only
    /// reachable via `skill_exec` after an allow-list check.
    pub scripts: HashMap<String, PathBuf>,
    /// Timeout applied to `skill_exec` invocations of this skill's scripts.
    pub timeout_ms: u64,
}

impl SkillDefinition {
    /// Parse a `SKILL.md` file's contents: `---\n<yaml>\n---\n<body>`.
    pub(crate) fn parse(path: &std::path::Path, contents: &str) -> SkillResult<(SkillFrontmatter, String)> {
        let rest = contents.strip_prefix("---\n").ok_or_else(|| SkillError::InvalidDefinition {
            path: path.display().to_string(),
            reason: "missing YAML frontmatter delimiter".to_string(),
        })?;

        let end = rest.find("\n---").ok_or_else(|| SkillError::InvalidDefinition {
            path: path.display().to_string(),
            reason: "unterminated YAML frontmatter".to_string(),
        })?;

        let yaml = &rest[..end];
        let body = rest[end + "\n---".len()..].trim_start_matches('\n').to_string();

        let frontmatter: SkillFrontmatter =
            serde_yaml::from_str(yaml).map_err(|e| SkillError::InvalidDefinition {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Ok((frontmatter, body))
    }

    /// The rendered instruction payload returned by `skill_call`.
    #[must_use]
    pub fn render(&self) -> String {
        format!("# Skill: {}\n\n{}", self.name, self.body)
    }

    /// Timeout in whole seconds, for `skill_exec`'s subprocess wait.
    #[must_use]
    pub fn timeout_s(&self) -> f64 {
        self.timeout_ms as f64 / 1000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_frontmatter_and_body() {
        let contents = "---\nname: search\ndescription: do a search\ntimeout_ms: 5000\n---\n# Instructions\nDo the thing.\n";
        let (fm, body) = SkillDefinition::parse(std::path::Path::new("SKILL.md"), contents).unwrap();
        assert_eq!(fm.name, "search");
        assert_eq!(fm.timeout_ms, 5000);
        assert_eq!(body, "# Instructions\nDo the thing.\n");
    }

    #[test]
    fn missing_delimiter_is_an_error() {
        let result = SkillDefinition::parse(std::path::Path::new("SKILL.md"), "no frontmatter here");
        assert!(result.is_err());
    }

    #[test]
    fn timeout_ms_defaults_when_absent() {
        let contents = "---\nname: x\ndescription: y\n---\nbody\n";
        let (fm, _) = SkillDefinition::parse(std::path::Path::new("SKILL.md"), contents).unwrap();
        assert_eq!(fm.timeout_ms, 30_000);
    }
}
