//! Test fixtures for on-disk Skill/SubAgent definitions and common
//! `weave-core` values.

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use uuid::Uuid;

/// Write a `SKILL.md` under `root/<name>/`, creating the directory if
/// needed. Mirrors the frontmatter shape `weave_skills::load_dirs` expects.
pub fn write_skill(root: &Path, name: &str, description: &str, body: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).expect("create skill directory");
    fs::write(
        dir.join("SKILL.md"),
        format!("---\nname: {name}\ndescription: {description}\n---\n{body}"),
    )
    .expect("write SKILL.md");
}

/// Write a `SKILL.md` plus a named script under `root/<name>/scripts/`.
pub fn write_skill_with_script(root: &Path, name: &str, description: &str, body: &str, script_name: &str, script_contents: &str) {
    write_skill(root, name, description, body);
    let scripts_dir = root.join(name).join("scripts");
    fs::create_dir_all(&scripts_dir).expect("create scripts directory");
    fs::write(scripts_dir.join(script_name), script_contents).expect("write script");
}

/// Write an `AGENT.md` under `root/<name>.md`, using the `local_react`
/// backend with an optional tool allow-list.
pub fn write_local_react_agent(root: &Path, name: &str, description: &str, system_prompt: &str, tools: Option<&[&str]>) {
    let tools_line = tools
        .map(|t| format!("tools: [{}]\n", t.join(", ")))
        .unwrap_or_default();
    fs::create_dir_all(root).expect("create agent directory");
    fs::write(
        root.join(format!("{name}.md")),
        format!("---\nname: {name}\ndescription: {description}\ntype: local_react\n{tools_line}---\n{system_prompt}"),
    )
    .expect("write AGENT.md");
}

/// Write an `AGENT.md` under `root/<name>.md`, using the `http` backend.
pub fn write_http_agent(root: &Path, name: &str, description: &str, endpoint: &str) {
    fs::create_dir_all(root).expect("create agent directory");
    fs::write(
        root.join(format!("{name}.md")),
        format!("---\nname: {name}\ndescription: {description}\ntype: http\nendpoint: {endpoint}\n---\n"),
    )
    .expect("write AGENT.md");
}

/// A `TempDir` pre-populated with one skill, for tests that just need a
/// loadable directory and don't care about its specific contents.
#[must_use]
pub fn test_skill_dir() -> TempDir {
    let tmp = TempDir::new().expect("create temp dir");
    write_skill(tmp.path(), "search", "search the web", "Use web_search.");
    tmp
}

/// A `TempDir` pre-populated with one `local_react` sub-agent definition.
#[must_use]
pub fn test_subagent_dir() -> TempDir {
    let tmp = TempDir::new().expect("create temp dir");
    write_local_react_agent(tmp.path(), "researcher", "researches a topic", "You are a focused researcher.", None);
    tmp
}

/// A fresh session id string, formatted the way `AmbientContext` expects.
#[must_use]
pub fn test_session_id() -> String {
    format!("sess-{}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_dir_is_loadable() {
        let dir = test_skill_dir();
        let registry = weave_skills::load_dirs(&[dir.path()]).unwrap();
        assert!(registry.has("search"));
    }

    #[test]
    fn test_subagent_dir_is_loadable() {
        let dir = test_subagent_dir();
        let registry = weave_subagents::load_dirs(&[dir.path()]).unwrap();
        assert!(registry.get("researcher").is_some());
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(test_session_id(), test_session_id());
    }
}
