//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur when setting up telemetry.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The global tracing subscriber was already installed.
    #[error("failed to install the global tracing subscriber: {0}")]
    InitError(String),

    /// An invalid `env-filter` directive was supplied.
    #[error("invalid logging directive: {0}")]
    ConfigError(String),
}

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
