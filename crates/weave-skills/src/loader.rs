//! Directory scanning for Skill definitions.

use std::collections::HashMap;
use std::path::Path;

use crate::definition::SkillDefinition;
use crate::error::{SkillError, SkillResult};
use crate::registry::SkillRegistry;

const DEFINITION_FILENAME: &str = "SKILL.md";
const SCRIPTS_DIRNAME: &str = "scripts";

/// Load Skills from a sequence of root directories, each containing one
/// subdirectory per skill.
///
/// Directories are scanned in order (conventionally: built-in Skills first,
/// then user-supplied ones); a later directory's Skill overrides an earlier
/// one of the same name. A skill subdirectory with no `SKILL.md` is skipped
/// with a `tracing::warn!`, not a load failure — one malformed skill should
/// not prevent the rest of the catalog from loading.
pub fn load_dirs(dirs: &[impl AsRef<Path>]) -> SkillResult<SkillRegistry> {
    let mut skills = HashMap::new();

    for root in dirs {
        let root = root.as_ref();
        if !root.is_dir() {
            continue;
        }

        let entries = std::fs::read_dir(root).map_err(|source| SkillError::Io {
            path: root.display().to_string(),
            source,
        })?;

        for entry in entries {
            let entry = entry.map_err(|source| SkillError::Io {
                path: root.display().to_string(),
                source,
            })?;
            let skill_dir = entry.path();
            if !skill_dir.is_dir() {
                continue;
            }

            let definition_path = skill_dir.join(DEFINITION_FILENAME);
            if !definition_path.is_file() {
                tracing::warn!(
                    dir = %skill_dir.display(),
                    "skipping skill directory with no SKILL.md"
                );
                continue;
            }

            let contents = std::fs::read_to_string(&definition_path).map_err(|source| SkillError::Io {
                path: definition_path.display().to_string(),
                source,
            })?;
            let (frontmatter, body) = SkillDefinition::parse(&definition_path, &contents)?;

            let mut scripts = HashMap::new();
            let scripts_dir = skill_dir.join(SCRIPTS_DIRNAME);
            if scripts_dir.is_dir() {
                for script_entry in walkdir::WalkDir::new(&scripts_dir)
                    .min_depth(1)
                    .max_depth(1)
                    .into_iter()
                    .filter_map(Result::ok)
                {
                    let path = script_entry.path();
                    if path.is_file() {
                        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                            scripts.insert(stem.to_string(), path.to_path_buf());
                        }
                    }
                }
            }

            let definition = SkillDefinition {
                name: frontmatter.name.clone(),
                description: frontmatter.description,
                body,
                scripts,
                timeout_ms: frontmatter.timeout_ms,
            };

            // Later directories override earlier ones on name collision.
            skills.insert(frontmatter.name, definition);
        }
    }

    Ok(SkillRegistry::from_definitions(skills))
}
