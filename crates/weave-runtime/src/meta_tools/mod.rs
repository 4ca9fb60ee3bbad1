//! The meta-tools: the fixed, small set of tools that front the Skill and
//! SubAgent subsystems and the Todo store, keeping the LLM-facing catalog
//! O(1) in the number of loaded Skills/SubAgents (see §9).

mod skill_tools;
mod subagent_tools;
mod todo_tools;

pub use skill_tools::{SkillCallTool, SkillExecTool};
pub use subagent_tools::SubAgentCallTool;
pub use todo_tools::{TodoReadTool, TodoWriteTool};
