//! Directory scanning for SubAgent definitions.

use std::collections::HashMap;
use std::path::Path;

use crate::definition::SubAgentDefinition;
use crate::error::SubAgentResult;
use crate::registry::SubAgentRegistry;

const DEFINITION_FILENAME: &str = "AGENT.md";

/// Load SubAgents from a sequence of root directories, each containing one
/// subdirectory per agent. Same override-by-name semantics as
/// `weave_skills::load_dirs`: later directories win on name collision. A
/// definition that fails its type's validation is rejected with a
/// `tracing::warn!` naming the file; loading continues with the rest.
pub fn load_dirs(dirs: &[impl AsRef<Path>]) -> SubAgentResult<SubAgentRegistry> {
    let mut agents = HashMap::new();

    for root in dirs {
        let root = root.as_ref();
        if !root.is_dir() {
            continue;
        }

        let Ok(entries) = std::fs::read_dir(root) else {
            continue;
        };

        for entry in entries.flatten() {
            let agent_dir = entry.path();
            if !agent_dir.is_dir() {
                continue;
            }

            let definition_path = agent_dir.join(DEFINITION_FILENAME);
            if !definition_path.is_file() {
                tracing::warn!(
                    dir = %agent_dir.display(),
                    "skipping sub-agent directory with no AGENT.md"
                );
                continue;
            }

            let Ok(contents) = std::fs::read_to_string(&definition_path) else {
                tracing::warn!(path = %definition_path.display(), "failed to read AGENT.md");
                continue;
            };

            match SubAgentDefinition::parse(&definition_path, &contents) {
                Ok(definition) => {
                    agents.insert(definition.name.clone(), definition);
                },
                Err(err) => {
                    tracing::warn!(path = %definition_path.display(), error = %err, "skipping invalid sub-agent definition");
                },
            }
        }
    }

    Ok(SubAgentRegistry::from_definitions(agents))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_agent(root: &Path, name: &str, frontmatter_extra: &str, body: &str) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("AGENT.md"),
            format!("---\nname: {name}\ndescription: a test agent\n{frontmatter_extra}\n---\n{body}"),
        )
        .unwrap();
    }

    #[test]
    fn loads_local_react_agent() {
        let tmp = TempDir::new().unwrap();
        write_agent(tmp.path(), "researcher", "type: local_react\ntools: [web_search]", "You research things.");

        let registry = load_dirs(&[tmp.path()]).unwrap();
        let def = registry.get("researcher").unwrap();
        assert_eq!(def.max_depth, 3);
        match &def.backend {
            crate::definition::SubAgentBackend::LocalReact { system_prompt, tool_filter } => {
                assert_eq!(system_prompt, "You research things.");
                assert_eq!(tool_filter.as_deref(), Some(&["web_search".to_string()][..]));
            },
            _ => panic!("expected local_react"),
        }
    }

    #[test]
    fn invalid_definition_is_skipped_not_fatal() {
        let tmp = TempDir::new().unwrap();
        write_agent(tmp.path(), "broken_http", "type: http", "unused body");
        write_agent(tmp.path(), "ok_agent", "type: local_react", "A fine prompt.");

        let registry = load_dirs(&[tmp.path()]).unwrap();
        assert!(registry.get("broken_http").is_none());
        assert!(registry.get("ok_agent").is_some());
    }
}
