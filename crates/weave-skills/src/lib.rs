//! Skill loading and rendering.
//!
//! A Skill is a unit of operational knowledge: Markdown instructions plus an
//! optional set of named scripts. Instead of exposing every Skill as its
//! own LLM tool (which bloats context O(n) in the number of Skills), the
//! runtime exposes exactly one meta-tool, `skill_call`, whose description
//! and name `enum` are rebuilt from [`SkillRegistry::catalog`] at schema
//! emission time. See `weave-runtime` for the meta-tool itself; this crate
//! only owns loading and rendering.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod definition;
mod error;
mod loader;
mod registry;

pub use definition::SkillDefinition;
pub use error::{SkillError, SkillResult};
pub use loader::load_dirs;
pub use registry::SkillRegistry;
