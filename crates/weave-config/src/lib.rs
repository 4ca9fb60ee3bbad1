//! Layered configuration loading for the weave orchestration engine.
//!
//! Produces one immutable [`EngineConfig`] consumed by `ExecutionRouter` at
//! construction: embedded defaults → optional system file → optional user
//! file → optional workspace-local file → a narrow set of `WEAVE_*`
//! environment overrides → validation. See SPEC_FULL.md §10.4.
//!
//! # Example
//!
//! ```rust,no_run
//! # fn main() -> Result<(), weave_config::ConfigError> {
//! let config = weave_config::load(Some(std::path::Path::new(".")))?;
//! assert!(config.l3.max_iterations > 0);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

mod error;
mod loader;
mod merge;
mod types;
mod validate;

pub use error::{ConfigError, ConfigResult};
pub use loader::{load, load_file};
pub use types::{
    DirectoriesSection, EngineConfig, L1Section, L3Section, LoggingSection, SubagentsSection,
    TodoSection,
};
