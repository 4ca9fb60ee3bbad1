//! Post-merge configuration validation.

use crate::error::{ConfigError, ConfigResult};
use crate::types::EngineConfig;

/// Validate a fully-merged and deserialized [`EngineConfig`].
///
/// # Errors
///
/// Returns the first validation error found.
pub fn validate(config: &EngineConfig) -> ConfigResult<()> {
    validate_l3(config)?;
    validate_l1(config)?;
    validate_subagents(config)?;
    validate_logging(config)?;
    Ok(())
}

fn validate_l3(config: &EngineConfig) -> ConfigResult<()> {
    if config.l3.max_iterations == 0 {
        return Err(ConfigError::ValidationError {
            field: "l3.max_iterations".to_owned(),
            message: "must be at least 1".to_owned(),
        });
    }
    if config.l3.timeout_seconds == 0 {
        return Err(ConfigError::ValidationError {
            field: "l3.timeout_seconds".to_owned(),
            message: "must be at least 1".to_owned(),
        });
    }
    if config.l3.max_llm_calls == 0 {
        return Err(ConfigError::ValidationError {
            field: "l3.max_llm_calls".to_owned(),
            message: "must be at least 1".to_owned(),
        });
    }
    Ok(())
}

fn validate_l1(config: &EngineConfig) -> ConfigResult<()> {
    if config.l1.max_steps == 0 {
        return Err(ConfigError::ValidationError {
            field: "l1.max_steps".to_owned(),
            message: "must be at least 1 (the forced final summary step)".to_owned(),
        });
    }
    Ok(())
}

fn validate_subagents(config: &EngineConfig) -> ConfigResult<()> {
    if config.subagents.max_concurrent == 0 {
        return Err(ConfigError::ValidationError {
            field: "subagents.max_concurrent".to_owned(),
            message: "must be at least 1".to_owned(),
        });
    }
    Ok(())
}

fn validate_logging(config: &EngineConfig) -> ConfigResult<()> {
    if !matches!(config.logging.level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
        return Err(ConfigError::ValidationError {
            field: "logging.level".to_owned(),
            message: format!(
                "unsupported level '{}'; expected one of: trace, debug, info, warn, error",
                config.logging.level
            ),
        });
    }
    if !matches!(config.logging.format.as_str(), "pretty" | "compact" | "json") {
        return Err(ConfigError::ValidationError {
            field: "logging.format".to_owned(),
            message: format!(
                "unsupported format '{}'; expected one of: pretty, compact, json",
                config.logging.format
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&EngineConfig::default()).is_ok());
    }

    #[test]
    fn zero_max_iterations_is_rejected() {
        let mut config = EngineConfig::default();
        config.l3.max_iterations = 0;
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError { .. })));
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut config = EngineConfig::default();
        config.logging.level = "verbose".to_owned();
        assert!(matches!(validate(&config), Err(ConfigError::ValidationError { .. })));
    }
}
