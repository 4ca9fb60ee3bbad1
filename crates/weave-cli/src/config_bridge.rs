//! Converts a loaded [`weave_config::EngineConfig`] into the live types the
//! runtime/telemetry crates consume. Kept separate from `commands::run` the
//! way the teacher keeps its own config-to-runtime mapping in its own
//! module rather than inline in the command handler.

use weave_config::EngineConfig;
use weave_runtime::{L3Config, RouterConfig};
use weave_telemetry::{LogConfig, LogFormat};

/// Build the router's tier budgets from a loaded config.
#[must_use]
pub fn to_router_config(config: &EngineConfig) -> RouterConfig {
    RouterConfig {
        l1_max_steps: config.l1.max_steps,
        l3: L3Config {
            max_iterations: config.l3.max_iterations,
            timeout_seconds: config.l3.timeout_seconds,
            max_llm_calls: config.l3.max_llm_calls,
        },
    }
}

/// Build a `weave-telemetry` logging configuration from a loaded config.
#[must_use]
pub fn to_log_config(config: &EngineConfig) -> LogConfig {
    let format = match config.logging.format.as_str() {
        "json" => LogFormat::Json,
        "pretty" => LogFormat::Pretty,
        _ => LogFormat::Compact,
    };
    let mut log_config = LogConfig::new(config.logging.level.clone()).with_format(format);
    for directive in &config.logging.directives {
        log_config = log_config.with_directive(directive.clone());
    }
    log_config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn router_config_mirrors_engine_config_budgets() {
        let config = EngineConfig::default();
        let router_config = to_router_config(&config);
        assert_eq!(router_config.l1_max_steps, 3);
        assert_eq!(router_config.l3.max_iterations, 25);
    }

    #[test]
    fn unknown_format_falls_back_to_compact() {
        let mut config = EngineConfig::default();
        "weird".clone_into(&mut config.logging.format);
        let log_config = to_log_config(&config);
        assert!(format!("{log_config:?}").contains("Compact"));
    }
}
