//! Skill loading and lookup errors.

use thiserror::Error;

/// Errors from loading or invoking Skills.
#[derive(Debug, Error)]
pub enum SkillError {
    /// `skill_call`/`render` was asked for a name with no registered
    /// definition.
    #[error("skill not found: {0}")]
    SkillNotFound(String),

    /// `skill_exec` was asked for a `(skill, script)` pair not enumerated in
    /// that skill's `scripts/` directory.
    #[error("script not in allowlist: {skill}/{script}")]
    ScriptNotInAllowlist {
        /// Skill name.
        skill: String,
        /// Script name (file stem) that was requested.
        script: String,
    },

    /// A definition file (`SKILL.md`) could not be read or parsed.
    #[error("failed to load skill definition at {path}: {reason}")]
    InvalidDefinition {
        /// Path to the offending file.
        path: String,
        /// What went wrong.
        reason: String,
    },

    /// Filesystem error while scanning a skill directory.
    #[error("I/O error scanning {path}: {source}")]
    Io {
        /// Path being scanned.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for Skill operations.
pub type SkillResult<T> = Result<T, SkillError>;
