//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while loading or validating [`crate::EngineConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path that failed to read.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A config file's TOML failed to parse or deserialize.
    #[error("failed to parse config at {path}: {source}")]
    ParseError {
        /// Path of the offending file (or a synthetic label for merged/embedded content).
        path: String,
        /// Underlying TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A merged configuration failed post-load validation.
    #[error("invalid configuration field '{field}': {message}")]
    ValidationError {
        /// Dotted field path, e.g. `"l3.max_iterations"`.
        field: String,
        /// Human-readable description of the violation.
        message: String,
    },

    /// The user's home directory could not be determined.
    #[error("could not determine the user's home directory")]
    NoHomeDir,
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
