//! Logging and request-correlation context for the weave orchestration engine.
//!
//! This crate provides:
//! - Configurable logging setup with multiple formats
//! - A request context carrying `session_id`/`agent_depth`/`route` for
//!   correlation across one top-level execution call, including inside
//!   concurrently fanned-out tool tasks
//! - Integration with the `tracing` ecosystem
//!
//! # Example
//!
//! ```rust,no_run
//! use weave_telemetry::{LogConfig, LogFormat, setup_logging, RequestContext};
//!
//! # fn main() -> Result<(), weave_telemetry::TelemetryError> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Pretty)
//!     .with_directive("weave_runtime=trace");
//!
//! setup_logging(&config)?;
//!
//! let ctx = RequestContext::new("execution_router").with_operation("process_request");
//! let _guard = ctx.enter();
//! tracing::info!("processing request");
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]

pub mod prelude;

mod context;
mod error;
mod logging;

pub use context::{RequestContext, RequestGuard};
pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_default_logging, setup_logging};
