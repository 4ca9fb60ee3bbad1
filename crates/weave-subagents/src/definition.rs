//! `SubAgentDefinition`: one loaded Agent definition.

use serde::Deserialize;

use crate::error::{SubAgentError, SubAgentResult};

/// Raw YAML frontmatter shape, before type-specific validation.
#[derive(Debug, Deserialize)]
pub(crate) struct RawFrontmatter {
    pub name: String,
    pub description: String,
    #[serde(rename = "type", default = "default_type")]
    pub agent_type: String,
    #[serde(default)]
    pub tools: Option<Vec<String>>,
    #[serde(default)]
    pub entry: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_type() -> String {
    "local_react".to_string()
}
fn default_max_iterations() -> usize {
    10
}
fn default_timeout_ms() -> u64 {
    300_000
}
fn default_max_depth() -> usize {
    3
}

/// The type-specific payload of a [`SubAgentDefinition`].
#[derive(Debug, Clone)]
pub enum SubAgentBackend {
    /// Runs as a nested `L3ReActEngine` invocation with a restricted tool
    /// view.
    LocalReact {
        /// System prompt for the nested engine.
        system_prompt: String,
        /// Allow-listed tool names; `None` means the full parent registry.
        tool_filter: Option<Vec<String>>,
    },
    /// Dispatches to an in-process registered executor.
    LocalCode {
        /// Key into the embedding application's `CodeExecutorRegistry`.
        entry: String,
    },
    /// Dispatches to a remote HTTP endpoint.
    Http {
        /// Target URL.
        endpoint: String,
    },
}

/// A loaded SubAgent definition. Immutable after load.
#[derive(Debug, Clone)]
pub struct SubAgentDefinition {
    /// Unique name, used as the `subagent_call` argument.
    pub name: String,
    /// One-line description shown in the dynamically built `subagent_call`
    /// schema.
    pub description: String,
    /// Type-specific configuration.
    pub backend: SubAgentBackend,
    /// Iteration budget passed to the nested engine (`local_react` only;
    /// ignored by other backends).
    pub max_iterations: usize,
    /// Timeout in milliseconds for the whole sub-agent call, of any backend.
    pub timeout_ms: u64,
    /// Nesting ceiling: `subagent_call` refuses to run this agent once the
    /// ambient `agent_depth` reaches this value.
    pub max_depth: usize,
}

impl SubAgentDefinition {
    /// Parse and validate an `AGENT.md` file's contents:
    /// `---\n<yaml>\n---\n<body>` (the body is unused for anything but
    /// `local_react`, where it becomes the system prompt).
    pub(crate) fn parse(path: &std::path::Path, contents: &str) -> SubAgentResult<Self> {
        let rest = contents.strip_prefix("---\n").ok_or_else(|| SubAgentError::InvalidDefinition {
            path: path.display().to_string(),
            reason: "missing YAML frontmatter delimiter".to_string(),
        })?;
        let end = rest.find("\n---").ok_or_else(|| SubAgentError::InvalidDefinition {
            path: path.display().to_string(),
            reason: "unterminated YAML frontmatter".to_string(),
        })?;
        let yaml = &rest[..end];
        let body = rest[end + "\n---".len()..].trim_start_matches('\n').to_string();

        let raw: RawFrontmatter = serde_yaml::from_str(yaml).map_err(|e| SubAgentError::InvalidDefinition {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let invalid = |reason: &str| SubAgentError::InvalidDefinition {
            path: path.display().to_string(),
            reason: reason.to_string(),
        };

        let backend = match raw.agent_type.as_str() {
            "local_react" => {
                if body.trim().is_empty() {
                    return Err(invalid("local_react requires a non-empty system_prompt body"));
                }
                SubAgentBackend::LocalReact { system_prompt: body, tool_filter: raw.tools }
            },
            "local_code" => {
                let entry = raw.entry.ok_or_else(|| invalid("local_code requires `entry`"))?;
                SubAgentBackend::LocalCode { entry }
            },
            "http" => {
                let endpoint = raw.endpoint.ok_or_else(|| invalid("http requires `endpoint`"))?;
                if url::Url::parse(&endpoint).is_err() {
                    return Err(invalid("http `endpoint` is not a valid URL"));
                }
                SubAgentBackend::Http { endpoint }
            },
            other => return Err(invalid(&format!("unknown sub-agent type: {other}"))),
        };

        Ok(Self {
            name: raw.name,
            description: raw.description,
            backend,
            max_iterations: raw.max_iterations,
            timeout_ms: raw.timeout_ms,
            max_depth: raw.max_depth,
        })
    }
}
