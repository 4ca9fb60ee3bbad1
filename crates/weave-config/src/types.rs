//! Configuration types for the weave orchestration engine.
//!
//! All types here are plain, `serde(default)`-annotated structs with no
//! dependency on the other workspace crates — `ExecutionRouter` converts
//! this into the live `L3Config`/`L1FastTrack` knobs at construction.

use serde::{Deserialize, Serialize};

/// Root configuration for the orchestration engine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// `L3ReActEngine` budget defaults.
    pub l3: L3Section,
    /// `L1FastTrack` step bound.
    pub l1: L1Section,
    /// Skill/SubAgent directory search paths.
    pub directories: DirectoriesSection,
    /// `TodoStore` persistence knobs.
    pub todo: TodoSection,
    /// Default sub-agent concurrency/depth ceilings.
    pub subagents: SubagentsSection,
    /// Logging level, format, and per-crate directives.
    pub logging: LoggingSection,
}

/// `L3ReActEngine` budget defaults (mirrors `weave_runtime::L3Config`, kept
/// dependency-free here and converted at the boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct L3Section {
    /// Hard cap on Think→Act iterations.
    pub max_iterations: usize,
    /// Wall-clock budget for the whole execution, in seconds.
    pub timeout_seconds: u64,
    /// Maximum number of Think (LLM) calls.
    pub max_llm_calls: usize,
}

impl Default for L3Section {
    fn default() -> Self {
        Self { max_iterations: 25, timeout_seconds: 300, max_llm_calls: 30 }
    }
}

/// `L1FastTrack` bounded-loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct L1Section {
    /// Maximum number of steps before the final, tool-less summary step.
    pub max_steps: usize,
}

impl Default for L1Section {
    fn default() -> Self {
        Self { max_steps: 3 }
    }
}

/// Search paths the `SkillRegistry`/`SubAgentRegistry` scan at startup,
/// later entries overriding earlier ones on name collision.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoriesSection {
    /// Directories scanned for `SKILL.md`-rooted Skill definitions, built-in
    /// first.
    pub skills: Vec<String>,
    /// Directories scanned for `AGENT.md`-rooted SubAgent definitions,
    /// built-in first.
    pub subagents: Vec<String>,
}

impl Default for DirectoriesSection {
    fn default() -> Self {
        Self { skills: vec!["./skills".to_owned()], subagents: vec!["./agents".to_owned()] }
    }
}

/// `TodoStore` persistence knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TodoSection {
    /// Time-to-live for a session's Todo list key, in seconds.
    pub ttl_seconds: u64,
}

impl Default for TodoSection {
    fn default() -> Self {
        Self { ttl_seconds: 7 * 24 * 60 * 60 }
    }
}

/// Default sub-agent concurrency and nesting limits, used when a
/// `SubAgentDefinition` omits them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SubagentsSection {
    /// Maximum number of sub-agents running concurrently across the process.
    pub max_concurrent: usize,
    /// Default nesting ceiling for recursive sub-agent delegation, used when
    /// a definition omits `max_depth`.
    pub default_max_depth: usize,
}

impl Default for SubagentsSection {
    fn default() -> Self {
        Self { max_concurrent: 5, default_max_depth: 3 }
    }
}

/// Logging configuration, consumed by `weave-telemetry::setup_logging`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`, `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, or `"json"`.
    pub format: String,
    /// Per-crate tracing directives, e.g. `["weave_runtime=debug"]`.
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self { level: "info".to_owned(), format: "compact".to_owned(), directives: Vec::new() }
    }
}
